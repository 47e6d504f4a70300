use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CuelineError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CuelineError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        CuelineError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        CuelineError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CuelineError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn question_mark_converts_anyhow() {
    fn inner() -> CuelineResult<()> {
        Err(anyhow::anyhow!("inner failure"))?;
        Ok(())
    }
    assert!(inner().unwrap_err().to_string().contains("inner failure"));
}
