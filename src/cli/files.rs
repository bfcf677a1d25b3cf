//! File-operation handlers

use serde_json::json;

use crate::cli::{print_response, FsArgs, FsCommand};
use crate::files::{FileManager, FsError};
use crate::host::Launcher;

/// Run one file operation and print its response. Typed results become the
/// payload; an [`FsError`] becomes the error detail and a nonzero process
/// exit.
pub async fn run(launcher: &Launcher, args: FsArgs) -> anyhow::Result<()> {
    let mut files = FileManager::new(launcher);
    if let Some(distribution) = &args.distribution {
        files = files.with_distribution(distribution);
    }

    let (echo, result) = match args.command {
        FsCommand::Read { path } => {
            let result = files.read_file(&path).await.map(|content| json!({ "content": content }));
            (json!({ "path": path }), result)
        }
        FsCommand::Write { path, content } => {
            let result = files.write_file(&path, &content).await.map(|()| json!({}));
            (json!({ "path": path }), result)
        }
        FsCommand::Append { path, content } => {
            let result = files.append_file(&path, &content).await.map(|()| json!({}));
            (json!({ "path": path }), result)
        }
        FsCommand::Mkdir { path, no_parents } => {
            let result = files.create_directory(&path, !no_parents).await.map(|()| json!({}));
            (json!({ "path": path }), result)
        }
        FsCommand::Ls { path } => {
            let result = files.list_directory(&path).await.map(|entries| {
                json!({ "count": entries.len(), "entries": entries })
            });
            (json!({ "path": path }), result)
        }
        FsCommand::Rm { path, recursive } => {
            let result = files.delete(&path, recursive).await.map(|()| json!({}));
            (json!({ "path": path, "recursive": recursive }), result)
        }
        FsCommand::Cp {
            source,
            destination,
            recursive,
        } => {
            let result = files.copy(&source, &destination, recursive).await.map(|()| json!({}));
            (json!({ "source": source, "destination": destination }), result)
        }
        FsCommand::Mv {
            source,
            destination,
        } => {
            let result = files.rename(&source, &destination).await.map(|()| json!({}));
            (json!({ "source": source, "destination": destination }), result)
        }
        FsCommand::Stat { path } => {
            let result = files.metadata(&path).await.map(|info| json!({ "info": info }));
            (json!({ "path": path }), result)
        }
        FsCommand::Exists { path } => {
            let result = files.exists(&path).await.map(|exists| json!({ "exists": exists }));
            (json!({ "path": path }), result)
        }
        FsCommand::IsDir { path } => {
            let result = files.is_directory(&path).await.map(|is_dir| json!({ "is_dir": is_dir }));
            (json!({ "path": path }), result)
        }
        FsCommand::IsFile { path } => {
            let result = files.is_file(&path).await.map(|is_file| json!({ "is_file": is_file }));
            (json!({ "path": path }), result)
        }
        FsCommand::Pwd => {
            let result = files.current_directory().await.map(|dir| json!({ "directory": dir }));
            (json!({}), result)
        }
        FsCommand::Cd { path } => {
            let result = files.change_directory(&path).await.map(|dir| json!({ "directory": dir }));
            (json!({ "path": path }), result)
        }
        FsCommand::Lines { path, start, end } => {
            let result = files
                .read_lines(&path, start, end)
                .await
                .map(|content| json!({ "content": content }));
            (json!({ "path": path, "start": start, "end": end }), result)
        }
        FsCommand::Search {
            path,
            pattern,
            regex,
        } => {
            let result = files.search(&path, &pattern, regex).await.map(|matches| {
                json!({ "match_count": matches.len(), "matches": matches })
            });
            (json!({ "path": path, "pattern": pattern }), result)
        }
        FsCommand::Count { path } => {
            let result = files.count_lines(&path).await.map(|lines| json!({ "lines": lines }));
            (json!({ "path": path }), result)
        }
    };

    respond(echo, result)
}

fn respond(echo: serde_json::Value, result: Result<serde_json::Value, FsError>) -> anyhow::Result<()> {
    let mut response = echo;
    if let Some(map) = response.as_object_mut() {
        match &result {
            Ok(payload) => {
                map.insert("success".into(), json!(true));
                if let Some(payload) = payload.as_object() {
                    for (key, value) in payload {
                        map.insert(key.clone(), value.clone());
                    }
                }
            }
            Err(e) => {
                map.insert("success".into(), json!(false));
                map.insert("error".into(), json!(e.to_string()));
            }
        }
    }
    print_response(&response);
    result.map(|_| ()).map_err(Into::into)
}
