use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PathviewError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PathviewError::unsupported_draw_mode("x")
            .to_string()
            .contains("unsupported draw mode:")
    );
    assert!(
        PathviewError::IndexOutOfRange { index: 9, len: 2 }
            .to_string()
            .contains("style index out of range: 9")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PathviewError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
