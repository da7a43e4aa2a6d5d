//! Input (mouse and keyboard) operations for CDP page session.

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{KeyEventType, MouseButton, MouseEventType};

use super::core::PageSession;
use super::keys::KeyDefinition;

fn key_event_name(event_type: KeyEventType) -> &'static str {
    match event_type {
        KeyEventType::KeyDown => "keyDown",
        KeyEventType::KeyUp => "keyUp",
        KeyEventType::RawKeyDown => "rawKeyDown",
        KeyEventType::Char => "char",
    }
}

impl PageSession {
    /// Left click at viewport coordinates.
    pub async fn click(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.mouse_move(x, y).await?;

        for event_type in [MouseEventType::MousePressed, MouseEventType::MouseReleased] {
            self.call(
                "Input.dispatchMouseEvent",
                Some(json!({
                    "type": event_type,
                    "x": x,
                    "y": y,
                    "button": MouseButton::Left,
                    "clickCount": 1,
                })),
            )
            .await?;
        }

        debug!("Clicked at ({:.1}, {:.1})", x, y);
        Ok(())
    }

    /// Move mouse to coordinates.
    pub async fn mouse_move(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            Some(json!({
                "type": MouseEventType::MouseMoved,
                "x": x,
                "y": y,
                "button": MouseButton::None,
            })),
        )
        .await?;
        Ok(())
    }

    /// Dispatch one wheel event with the pointer at `(x, y)`.
    pub async fn scroll(&self, x: f64, y: f64, delta_x: f64, delta_y: f64) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            Some(json!({
                "type": MouseEventType::MouseWheel,
                "x": x,
                "y": y,
                "deltaX": delta_x,
                "deltaY": delta_y,
            })),
        )
        .await?;
        Ok(())
    }

    /// Insert text into the focused element.
    pub async fn type_text(&self, text: &str) -> Result<(), CdpError> {
        self.call("Input.insertText", Some(json!({"text": text})))
            .await?;
        debug!("Typed {} characters", text.chars().count());
        Ok(())
    }

    /// Press and release a key.
    pub async fn press_key(&self, key: &str) -> Result<(), CdpError> {
        let def = KeyDefinition::lookup(key);
        self.dispatch_key(&def, KeyEventType::KeyDown, 0).await?;
        self.dispatch_key(&def, KeyEventType::KeyUp, 0).await
    }

    /// Press a key combination (e.g. `Control+a`).
    ///
    /// Modifiers go down in order, the key is pressed, then the modifiers
    /// are released in reverse order.
    pub async fn press_key_combo(&self, combo: &str) -> Result<(), CdpError> {
        let parts: Vec<&str> = combo.split('+').filter(|p| !p.is_empty()).collect();
        let Some((key, held)) = parts.split_last() else {
            return Err(CdpError::InvalidResponse(format!(
                "Empty key combination: '{}'",
                combo
            )));
        };

        let mut modifiers = 0;
        for name in held {
            modifiers |= Self::get_modifiers(&[name]);
            let def = KeyDefinition::lookup(name);
            self.dispatch_key(&def, KeyEventType::RawKeyDown, modifiers)
                .await?;
        }

        let def = KeyDefinition::lookup(key);
        self.dispatch_key(&def, KeyEventType::KeyDown, modifiers)
            .await?;
        self.dispatch_key(&def, KeyEventType::KeyUp, modifiers)
            .await?;

        for name in held.iter().rev() {
            modifiers &= !Self::get_modifiers(&[name]);
            let def = KeyDefinition::lookup(name);
            self.dispatch_key(&def, KeyEventType::KeyUp, modifiers)
                .await?;
        }
        Ok(())
    }

    async fn dispatch_key(
        &self,
        def: &KeyDefinition,
        event_type: KeyEventType,
        modifiers: i32,
    ) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchKeyEvent",
            Some(def.event_params(key_event_name(event_type), modifiers)),
        )
        .await?;
        Ok(())
    }

    /// Get modifier flags from modifier names.
    pub(super) fn get_modifiers(modifiers: &[&str]) -> i32 {
        let mut flags = 0;
        for m in modifiers {
            match m.to_lowercase().as_str() {
                "alt" => flags |= 1,
                "control" | "ctrl" => flags |= 2,
                "meta" | "command" | "cmd" => flags |= 4,
                "shift" => flags |= 8,
                _ => {}
            }
        }
        flags
    }
}
