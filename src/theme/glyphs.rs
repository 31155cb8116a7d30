// Nerd Font glyphs used across the UI.

pub const PANEL: &str = "󰕮";
pub const SEP_RIGHT: &str = "";
pub const RUNNING: &str = "󰑮";
pub const PROMPT: &str = "❯";

pub const ICON_FALLBACK: &str = "󰘳";

/// Glyph for a command's symbolic icon name. Unknown names get `ICON_FALLBACK`.
#[must_use]
pub fn icon_glyph(name: &str) -> &'static str {
    match name.trim().to_ascii_lowercase().as_str() {
        "device" | "devices" => "󰄜",
        "info" => "󰋼",
        "upload" => "󰕒",
        "download" => "󰇚",
        "install" => "󰏗",
        "uninstall" => "󰆴",
        "screenshot" | "camera" => "󰹑",
        "normal" | "terminal" | "shell" => "",
        "reboot" | "restart" => "󰜉",
        "log" | "logs" => "󰌱",
        "file" | "folder" => "󰉋",
        "settings" | "config" => "󰒓",
        _ => ICON_FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_icon_uses_fallback() {
        assert_eq!(icon_glyph("definitely-not-an-icon"), ICON_FALLBACK);
        assert_eq!(icon_glyph(""), ICON_FALLBACK);
        assert_ne!(icon_glyph("Upload"), ICON_FALLBACK);
    }
}
