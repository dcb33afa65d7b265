use ousd_shell_core::{PortError, TimestampMs};

pub fn now_ms() -> Result<TimestampMs, PortError> {
    let now = web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .map_err(|e| PortError::Transport(format!("time error: {e}")))?;
    Ok(TimestampMs(now.as_millis() as u64))
}
