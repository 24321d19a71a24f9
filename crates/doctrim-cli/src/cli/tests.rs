#[cfg(test)]
mod tests {
    use crate::cli::validation::{parse_directive, parse_extension};
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_parse_directive_valid_names() {
        assert_eq!(parse_directive("drawio-figure"), Ok("drawio-figure".to_string()));
        assert_eq!(parse_directive("py:figure"), Ok("py:figure".to_string()));
        assert_eq!(parse_directive("thumbnail_v2"), Ok("thumbnail_v2".to_string()));
        // Copy-pasted from a document
        assert_eq!(parse_directive("mermaid::"), Ok("mermaid".to_string()));
    }

    #[test]
    fn test_parse_directive_invalid_names() {
        assert!(parse_directive("").is_err());
        assert!(parse_directive("  ").is_err());
        assert!(parse_directive("-figure").is_err());
        assert!(parse_directive("my figure").is_err());
        assert!(parse_directive("fig/ure").is_err());
        assert!(parse_directive("figure:").is_err());
        assert_eq!(parse_directive("").unwrap_err(), "Directive name cannot be empty");
    }

    #[test]
    fn test_parse_extension() {
        assert_eq!(parse_extension("rst"), Ok("rst".to_string()));
        assert_eq!(parse_extension(".txt"), Ok("txt".to_string()));
        assert!(parse_extension("").is_err());
        assert!(parse_extension(".").is_err());
        assert!(parse_extension("tar.gz").is_err());
        assert!(parse_extension("a/b").is_err());
    }

    #[test]
    fn test_rm_minimal() {
        let cli = Cli::try_parse_from(["doctrim", "rm", "docs"]).unwrap();
        match cli.command {
            Command::Rm(args) => {
                assert_eq!(args.path, PathBuf::from("docs"));
                assert!(!args.dry_run);
                assert!(args.roots.is_empty());
                assert!(args.extension.is_none());
                assert!(!args.json);
            }
        }
    }

    #[test]
    fn test_rm_all_flags() {
        let cli = Cli::try_parse_from([
            "doctrim",
            "--no-color",
            "rm",
            "docs",
            "--dry-run",
            "--root",
            "index",
            "--root",
            "api/index",
            "--ext",
            ".rst",
            "--include",
            "guide/**",
            "--exclude",
            "drafts/**",
            "--directive",
            "drawio-figure",
            "--prune-dirs",
            "--config",
            "ci.toml",
            "--json",
        ])
        .unwrap();

        assert!(cli.no_color);
        let Command::Rm(args) = cli.command;
        assert!(args.dry_run);
        assert_eq!(args.roots, vec!["index", "api/index"]);
        assert_eq!(args.extension.as_deref(), Some("rst"));
        assert_eq!(args.include, vec!["guide/**"]);
        assert_eq!(args.exclude, vec!["drafts/**"]);
        assert_eq!(args.directives, vec!["drawio-figure"]);
        assert!(args.prune_dirs);
        assert_eq!(args.config, Some(PathBuf::from("ci.toml")));
        assert!(args.json);
    }

    #[test]
    fn test_rm_requires_path() {
        assert!(Cli::try_parse_from(["doctrim", "rm"]).is_err());
    }

    #[test]
    fn test_rm_rejects_bad_directive() {
        assert!(Cli::try_parse_from(["doctrim", "rm", "docs", "--directive", "bad name"]).is_err());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["doctrim", "-v", "-q", "rm", "docs"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["doctrim", "rm", "docs", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
