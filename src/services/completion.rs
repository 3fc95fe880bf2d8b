//! Completion hook run when a countdown finishes

use tokio::process::Command;
use tracing::{debug, info};

/// Run the configured completion command through `sh -c`
pub async fn run_completion_command(command: &str) -> Result<(), String> {
    debug!("Running completion command: {}", command);

    let output = Command::new("sh")
        .args(["-c", command])
        .output()
        .await
        .map_err(|e| format!("Failed to execute completion command: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "completion command exited with {}: {}",
            output.status.code().unwrap_or(-1),
            stderr.trim()
        ));
    }

    info!("Completion command executed");
    Ok(())
}
