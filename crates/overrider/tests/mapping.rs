use overrider::ResolutionConfig;
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> { "[A-Z][a-z]{1,8}" }

proptest! {
    #[test]
    fn candidate_path_mirrors_segments(segments in prop::collection::vec(segment(), 1..5)) {
        let root = tempfile::tempdir().unwrap();
        // Segments are letters only, so the base token never occurs inside one.
        let config = ResolutionConfig::new("Base1\\Overrides", "Base1", root.path()).unwrap();

        let qualified = format!("Base1\\{}", segments.join("\\"));
        let mut expected = root.path().to_path_buf();
        for s in &segments[..segments.len() - 1] {
            expected.push(s);
        }
        expected.push(format!("{}.toml", segments[segments.len() - 1]));

        prop_assert_eq!(config.candidate_path(&qualified), expected);
        prop_assert_eq!(
            config.resolved_name(&qualified),
            format!("Base1\\Overrides\\{}", segments.join("\\"))
        );
    }

    #[test]
    fn names_outside_base_keep_their_segments(segments in prop::collection::vec(segment(), 1..5)) {
        let root = tempfile::tempdir().unwrap();
        let config = ResolutionConfig::new("Base1\\Overrides", "Base1", root.path()).unwrap();

        let qualified = segments.join("\\");
        prop_assert_eq!(config.resolved_name(&qualified), qualified.clone());
        let path = config.candidate_path(&qualified);
        prop_assert_eq!(path.to_str().unwrap(), format!("{}.toml", segments.join("/")));
    }
}
