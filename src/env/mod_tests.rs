//! Tests for the environment store and startup snapshot.

use super::*;
use crate::config::Catalog;

mod store {
    use super::*;

    #[test]
    fn set_and_get() {
        let mut env = EnvStore::new();
        env.set("AWS_PROFILE", "prod");

        assert_eq!(env.get("AWS_PROFILE"), Some("prod"));
        assert!(env.contains("AWS_PROFILE"));
        assert!(!env.contains("AWS_REGION"));
    }

    #[test]
    fn version_counts_effective_writes() {
        let mut env = EnvStore::from_pairs([("A", "1")]);
        assert_eq!(env.version(), 0);

        env.set("A", "1");
        assert_eq!(env.version(), 0);

        env.set("A", "2");
        env.set("B", "");
        assert_eq!(env.version(), 2);
    }

    #[test]
    fn iterates_in_name_order() {
        let env = EnvStore::from_pairs([("B", "2"), ("A", "1")]);
        let names: Vec<_> = env.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(env.len(), 2);
        assert!(!env.is_empty());
    }

    #[test]
    fn from_process_sees_path() {
        let env = EnvStore::from_process();
        assert_eq!(
            env.get("PATH").map(str::to_string),
            std::env::var("PATH").ok()
        );
    }

    #[test]
    fn command_environment_is_exactly_the_store() {
        let env = EnvStore::from_pairs([("CFN_TOOL_KEEP", "true")]);
        let command = env.command("true");

        let vars: Vec<_> = command
            .get_envs()
            .map(|(k, v)| (k.to_os_string(), v.map(std::ffi::OsStr::to_os_string)))
            .collect();

        assert_eq!(vars, vec![("CFN_TOOL_KEEP".into(), Some("true".into()))]);
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_variables_reach_child_processes() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(vec![b'f', b'o', 0xff]);
        let env = EnvStore::from_os_pairs([
            (OsString::from("LEGACY"), raw.clone()),
            (OsString::from("CFN_TOOL_KEEP"), OsString::from("true")),
        ]);

        let vars: Vec<_> = env
            .command("true")
            .get_envs()
            .map(|(k, v)| (k.to_os_string(), v.map(std::ffi::OsStr::to_os_string)))
            .collect();

        assert_eq!(env.get("LEGACY"), None);
        assert_eq!(env.len(), 1);
        assert_eq!(
            vars,
            vec![
                (OsString::from("CFN_TOOL_KEEP"), Some(OsString::from("true"))),
                (OsString::from("LEGACY"), Some(raw)),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn writing_replaces_a_non_unicode_value() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let mut env =
            EnvStore::from_os_pairs([(OsString::from("AWS_PROFILE"), OsString::from_vec(vec![0xff]))]);
        env.set("AWS_PROFILE", "prod");

        let vars: Vec<_> = env.command("true").get_envs().map(|(k, _)| k.to_os_string()).collect();

        assert_eq!(env.get("AWS_PROFILE"), Some("prod"));
        assert_eq!(vars, vec![OsString::from("AWS_PROFILE")]);
    }
}

mod snapshot {
    use super::*;

    #[test]
    fn captures_only_catalog_variables() {
        let env = EnvStore::from_pairs([
            ("AWS_REGION", "us-east-1"),
            ("AWS_DEFAULT_REGION", "us-east-1"),
            ("CFN_TOOL_KEEP", ""),
            ("HOME", "/root"),
        ]);

        let snapshot = EnvSnapshot::capture(Catalog::standard(), &env);

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains("AWS_REGION"));
        assert!(snapshot.contains("CFN_TOOL_KEEP"));
        assert!(!snapshot.contains("AWS_DEFAULT_REGION"));
        assert!(!snapshot.contains("HOME"));
    }

    #[test]
    fn unaffected_by_later_writes() {
        let mut env = EnvStore::new();
        let snapshot = EnvSnapshot::capture(Catalog::standard(), &env);

        env.set("CFN_TOOL_BUCKET", "b");

        assert!(snapshot.is_empty());
        assert!(!snapshot.contains("CFN_TOOL_BUCKET"));
    }
}
