use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LaminaError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(LaminaError::not_found("x").to_string().contains("not found:"));
    assert!(LaminaError::load("x").to_string().contains("load error:"));
    assert!(LaminaError::cycle("x").to_string().contains("cycle error:"));
    assert!(
        LaminaError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LaminaError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
