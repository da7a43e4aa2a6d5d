//! DOM key definitions for `Input.dispatchKeyEvent`.
//!
//! Chrome only performs default actions (form submit, focus change) when
//! the event carries a virtual key code, and only inserts characters when
//! it carries `text`.

use serde_json::{json, Value};

/// Everything CDP needs to synthesize one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDefinition {
    pub key: String,
    pub code: String,
    pub key_code: u32,
    pub text: Option<String>,
}

impl KeyDefinition {
    /// Resolve a key name such as `Enter`, `Tab`, `a` or `F5`.
    pub fn lookup(name: &str) -> Self {
        let named = |key: &str, code: &str, key_code: u32, text: Option<&str>| Self {
            key: key.to_string(),
            code: code.to_string(),
            key_code,
            text: text.map(str::to_string),
        };

        match name.to_lowercase().as_str() {
            "enter" | "return" => return named("Enter", "Enter", 13, Some("\r")),
            "tab" => return named("Tab", "Tab", 9, None),
            "escape" | "esc" => return named("Escape", "Escape", 27, None),
            "backspace" => return named("Backspace", "Backspace", 8, None),
            "delete" => return named("Delete", "Delete", 46, None),
            "space" | " " => return named(" ", "Space", 32, Some(" ")),
            "arrowup" | "up" => return named("ArrowUp", "ArrowUp", 38, None),
            "arrowdown" | "down" => return named("ArrowDown", "ArrowDown", 40, None),
            "arrowleft" | "left" => return named("ArrowLeft", "ArrowLeft", 37, None),
            "arrowright" | "right" => return named("ArrowRight", "ArrowRight", 39, None),
            "home" => return named("Home", "Home", 36, None),
            "end" => return named("End", "End", 35, None),
            "pageup" => return named("PageUp", "PageUp", 33, None),
            "pagedown" => return named("PageDown", "PageDown", 34, None),
            "shift" => return named("Shift", "ShiftLeft", 16, None),
            "control" | "ctrl" => return named("Control", "ControlLeft", 17, None),
            "alt" => return named("Alt", "AltLeft", 18, None),
            "meta" | "command" | "cmd" => return named("Meta", "MetaLeft", 91, None),
            _ => {}
        }

        if let Some(n) = name
            .strip_prefix(['F', 'f'])
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|n| (1..=12).contains(n))
        {
            let key = format!("F{n}");
            return Self {
                code: key.clone(),
                key,
                key_code: 111 + n,
                text: None,
            };
        }

        let mut chars = name.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            let upper = ch.to_ascii_uppercase();
            let (code, key_code) = if ch.is_ascii_alphabetic() {
                (format!("Key{upper}"), upper as u32)
            } else if ch.is_ascii_digit() {
                (format!("Digit{ch}"), ch as u32)
            } else {
                (String::new(), 0)
            };
            return Self {
                key: ch.to_string(),
                code,
                key_code,
                text: Some(ch.to_string()),
            };
        }

        Self {
            key: name.to_string(),
            code: String::new(),
            key_code: 0,
            text: None,
        }
    }

    /// Event parameters for one key event.
    ///
    /// Text is dropped while Control/Alt/Meta are held so that shortcuts
    /// such as `Control+a` do not type the letter.
    pub(crate) fn event_params(&self, event_type: &str, modifiers: i32) -> Value {
        let mut params = json!({
            "type": event_type,
            "key": self.key,
            "code": self.code,
            "windowsVirtualKeyCode": self.key_code,
            "nativeVirtualKeyCode": self.key_code,
            "modifiers": modifiers,
        });
        if event_type == "keyDown" && modifiers & 0b0111 == 0 {
            if let Some(text) = &self.text {
                params["text"] = json!(text);
            }
        }
        params
    }
}
