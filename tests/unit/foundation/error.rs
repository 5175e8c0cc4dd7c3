use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FlexError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FlexError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(FlexError::emit("x").to_string().contains("emit error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FlexError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn fmt_error_maps_to_emit() {
    let err = FlexError::from(std::fmt::Error);
    assert!(matches!(err, FlexError::Emit(_)));
}
