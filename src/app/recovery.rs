#[must_use]
pub fn get_suggestions(msg: &str) -> Vec<String> {
    let mut suggestions = Vec::new();
    let msg_lower = msg.to_lowercase();

    if msg_lower.contains("failed to start") {
        suggestions.push("Check the [shell] program and args in config.toml".to_string());
    }

    if msg_lower.contains("hdc") && (msg_lower.contains("not found") || msg_lower.contains("not recognized")) {
        suggestions.push("Install the device connector (hdc) and add it to PATH".to_string());
    }

    if msg_lower.contains("device") && (msg_lower.contains("offline") || msg_lower.contains("not found")) {
        suggestions.push("Connect a device and check it with: hdc list targets".to_string());
    }

    if msg_lower.contains("failed to persist") {
        suggestions.push(
            "Check that the config directory is writable (set CMDPANEL_HOME to move it)".to_string(),
        );
    }

    if msg_lower.contains("permission denied") {
        suggestions.push("Check the permissions of the file or directory involved".to_string());
    }

    if msg_lower.contains("already running") {
        suggestions.push("Wait for the current command to finish".to_string());
    }

    if msg_lower.contains("file not found") {
        suggestions.push("Enter an existing local file (absolute or relative to the working directory)".to_string());
    }

    suggestions
}
