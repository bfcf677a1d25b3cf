//! Distribution lifecycle handlers

use anyhow::bail;
use serde_json::json;

use crate::cli::{print_response, ExportArgs, ImportArgs, InstallArgs, ListArgs};
use crate::core::{parse_distro_table, parse_online_list, CommandOutcome};
use crate::host::{InstallOptions, Invocation, Launcher};

/// Surface a fixed-flag lifecycle outcome as a response, echoing the fields
/// the caller supplied.
fn respond(outcome: &CommandOutcome, mut fields: serde_json::Value) -> anyhow::Result<()> {
    if let Some(map) = fields.as_object_mut() {
        map.insert("success".into(), json!(outcome.success()));
        if outcome.success() {
            map.insert("message".into(), json!(outcome.stdout));
        } else {
            map.insert("error".into(), json!(outcome.stderr));
        }
    }
    print_response(&fields);

    if !outcome.success() {
        bail!("launcher exited with code {}: {}", outcome.exit_code, outcome.stderr);
    }
    Ok(())
}

pub async fn list(launcher: &Launcher, args: ListArgs) -> anyhow::Result<()> {
    if args.online {
        let outcome = launcher.invoke(&Invocation::list_online()).await;
        if !outcome.success() {
            return respond(&outcome, json!({ "online": true }));
        }
        print_response(&json!({
            "success": true,
            "online": true,
            "distributions": parse_online_list(&outcome.stdout),
        }));
        return Ok(());
    }

    if args.names {
        let outcome = launcher.invoke(&Invocation::list_installed()).await;
        if !outcome.success() {
            return respond(&outcome, json!({ "online": false }));
        }
        // Same shape as the online catalogue: a header then one name per line.
        print_response(&json!({
            "success": true,
            "online": false,
            "distributions": parse_online_list(&outcome.stdout),
        }));
        return Ok(());
    }

    let outcome = launcher.invoke(&Invocation::list_installed_verbose()).await;
    if !outcome.success() {
        return respond(&outcome, json!({ "online": false }));
    }
    print_response(&json!({
        "success": true,
        "online": false,
        "distributions": parse_distro_table(&outcome.stdout),
    }));
    Ok(())
}

pub async fn status(launcher: &Launcher) -> anyhow::Result<()> {
    let outcome = launcher.invoke(&Invocation::status()).await;
    respond(&outcome, json!({}))
}

pub async fn version(launcher: &Launcher) -> anyhow::Result<()> {
    let outcome = launcher.invoke(&Invocation::version()).await;
    if !outcome.success() {
        return respond(&outcome, json!({}));
    }
    print_response(&json!({
        "success": true,
        "banner": outcome.stdout,
        "version": extract_version(&outcome.stdout),
    }));
    Ok(())
}

pub async fn shutdown(launcher: &Launcher) -> anyhow::Result<()> {
    let outcome = launcher.invoke(&Invocation::shutdown()).await;
    respond(&outcome, json!({}))
}

pub async fn terminate(launcher: &Launcher, distribution: &str) -> anyhow::Result<()> {
    let outcome = launcher.invoke(&Invocation::terminate(distribution)).await;
    respond(&outcome, json!({ "distribution": distribution }))
}

pub async fn set_default(launcher: &Launcher, distribution: &str) -> anyhow::Result<()> {
    let outcome = launcher.invoke(&Invocation::set_default(distribution)).await;
    respond(&outcome, json!({ "distribution": distribution }))
}

pub async fn default_distro(launcher: &Launcher) -> anyhow::Result<()> {
    let name = launcher.default_distribution().await;
    print_response(&json!({
        "success": !name.is_empty(),
        "distribution": name,
    }));
    Ok(())
}

pub async fn install(launcher: &Launcher, args: InstallArgs) -> anyhow::Result<()> {
    let outcome = launcher
        .invoke(&Invocation::install(&InstallOptions {
            distribution: args.distribution.clone(),
            web_download: args.web_download,
            no_launch: args.no_launch,
        }))
        .await;
    respond(
        &outcome,
        json!({ "distribution": args.distribution.as_deref().unwrap_or("default") }),
    )
}

pub async fn export(launcher: &Launcher, args: ExportArgs) -> anyhow::Result<()> {
    let outcome = launcher
        .invoke(&Invocation::export(&args.distribution, &args.file, args.format))
        .await;
    respond(
        &outcome,
        json!({ "distribution": args.distribution, "file": args.file }),
    )
}

pub async fn import(launcher: &Launcher, args: ImportArgs) -> anyhow::Result<()> {
    let outcome = launcher
        .invoke(&Invocation::import(
            &args.distribution,
            &args.location,
            &args.file,
            args.version,
        ))
        .await;
    respond(
        &outcome,
        json!({
            "distribution": args.distribution,
            "location": args.location,
            "file": args.file,
            "version": args.version,
        }),
    )
}

pub async fn unregister(launcher: &Launcher, distribution: &str) -> anyhow::Result<()> {
    let outcome = launcher.invoke(&Invocation::unregister(distribution)).await;
    respond(&outcome, json!({ "distribution": distribution }))
}

/// Extract a dotted version number from a banner like
/// `WSL version: 2.0.14.0`.
fn extract_version(banner: &str) -> Option<String> {
    let re = regex_lite::Regex::new(r"(\d+(?:\.\d+)+)").ok()?;
    re.find(banner).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_version_number_from_banner() {
        assert_eq!(
            extract_version("WSL version: 2.0.14.0\nKernel version: 5.15.133.1-1"),
            Some("2.0.14.0".to_string())
        );
        assert_eq!(extract_version("no digits here"), None);
    }
}
