use tokio::process::Command;
use tokio::sync::OnceCell;

static LAST_COMMIT: OnceCell<String> = OnceCell::const_new();

/// Commit date of the running build, shown in every page footer.
///
/// Read from git once per process; empty when git or the repository is
/// unavailable.
pub async fn last_commit() -> &'static str {
    LAST_COMMIT
        .get_or_init(|| async {
            read_last_commit().await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Could not determine the last commit");
                String::new()
            })
        })
        .await
        .as_str()
}

async fn read_last_commit() -> anyhow::Result<String> {
    let output = Command::new("git")
        .args(["log", "-1", "--format=%cI"])
        .output()
        .await?;
    if !output.status.success() {
        anyhow::bail!(
            "git log exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}
