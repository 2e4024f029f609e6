//! Replacing the glue rule table swaps process-wide state, so this lives in
//! its own test binary where no other test reads the table concurrently.

use tex_layout::glue::{self, GlueSettings, GlueSpec};

#[test]
fn reload_replaces_the_whole_table() {
    let _ = env_logger::builder().is_test(true).try_init();

    assert_eq!(glue::settings().named("thin").space(), 3.0);

    let custom = GlueSettings::new(
        vec![
            GlueSpec::new(0.0, 0.0, 0.0, "none"),
            GlueSpec::new(6.0, 0.0, 0.0, "thin"),
        ],
        [[[0; 4]; 8]; 8],
    );
    glue::reload(custom);
    let snapshot = glue::settings();
    assert_eq!(snapshot.named("thin").space(), 6.0);
    // rules not present in the new table fall back to no space
    assert_eq!(snapshot.named("med").space(), 0.0);

    // reloading again fully replaces the previous reload
    glue::reload(GlueSettings::builtin());
    assert_eq!(glue::settings().named("med").space(), 4.0);
}
