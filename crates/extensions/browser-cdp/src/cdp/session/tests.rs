use super::*;

#[test]
fn test_get_modifiers() {
    assert_eq!(PageSession::get_modifiers(&["Control"]), 2);
    assert_eq!(PageSession::get_modifiers(&["ctrl", "Shift"]), 10);
    assert_eq!(PageSession::get_modifiers(&["Alt", "Meta"]), 5);
    assert_eq!(PageSession::get_modifiers(&["cmd"]), 4);
    assert_eq!(PageSession::get_modifiers(&["Hyper"]), 0);
}

#[test]
fn test_lookup_enter_submits() {
    let def = KeyDefinition::lookup("Enter");
    assert_eq!(def.key_code, 13);
    assert_eq!(def.text.as_deref(), Some("\r"));
    assert_eq!(KeyDefinition::lookup("return"), def);
}

#[test]
fn test_lookup_letters_and_digits() {
    let a = KeyDefinition::lookup("a");
    assert_eq!(a.code, "KeyA");
    assert_eq!(a.key_code, 65);
    assert_eq!(a.text.as_deref(), Some("a"));

    let seven = KeyDefinition::lookup("7");
    assert_eq!(seven.code, "Digit7");
    assert_eq!(seven.key_code, 55);
}

#[test]
fn test_lookup_function_keys() {
    assert_eq!(KeyDefinition::lookup("F5").key_code, 116);
    assert_eq!(KeyDefinition::lookup("f12").key, "F12");
    // Not a function key
    assert_eq!(KeyDefinition::lookup("F13").key_code, 0);
}

#[test]
fn test_lookup_unknown_key_passes_through() {
    let def = KeyDefinition::lookup("MediaPlayPause");
    assert_eq!(def.key, "MediaPlayPause");
    assert!(def.text.is_none());
}

#[test]
fn test_event_params_text_only_on_plain_keydown() {
    let def = KeyDefinition::lookup("a");
    let down = def.event_params("keyDown", 0);
    assert_eq!(down["text"], "a");
    assert_eq!(down["windowsVirtualKeyCode"], 65);

    let up = def.event_params("keyUp", 0);
    assert!(up.get("text").is_none());

    // Control held
    let ctrl = def.event_params("keyDown", 2);
    assert!(ctrl.get("text").is_none());
    assert_eq!(ctrl["modifiers"], 2);

    // Shift alone still types
    let shifted = def.event_params("keyDown", 8);
    assert_eq!(shifted["text"], "a");
}
