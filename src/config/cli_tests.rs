//! Tests for CLI argument parsing and command-level resolution.

use std::fs;
use std::path::PathBuf;

use clap::error::ErrorKind;
use tempfile::tempdir;
use toml::{Table, Value};

use super::ConfigError;
use super::cli::{Choice, Cli, CommandOptions, Feature};
use super::resolve::ValueSource;
use super::settings::Settings;
use super::toml::load_file_settings;

const FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml");
const PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/src");

/// Raw argv (no program name) followed by the two required positionals.
fn argv(args: &[&str]) -> Vec<String> {
    args.iter()
        .copied()
        .chain([FILE, PATH])
        .map(String::from)
        .collect()
}

fn cli(raw: &[String]) -> Cli {
    Cli::parse_from_iter(std::iter::once("mitfixins").chain(raw.iter().map(String::as_str)))
}

fn file(content: &str) -> Table {
    toml::from_str(content).unwrap()
}

/// Parses, resolves against a `[mitfixins]` section body and converts to typed options.
fn resolve(args: &[&str], file_content: &str) -> CommandOptions {
    let raw = argv(args);
    let cli = cli(&raw);
    let descriptors = Cli::option_descriptors();
    let resolved = cli.resolve(&descriptors, &file(file_content), &raw).unwrap();
    CommandOptions::from_settings(&resolved.settings).unwrap()
}

mod parsing {
    use clap::Parser;

    use super::*;

    #[test]
    fn defaults_without_switches() {
        let options = cli(&argv(&[])).options();

        assert_eq!(options, CommandOptions::default());
        assert_eq!(options.option, 42);
    }

    #[test]
    fn positionals() {
        let mut raw = argv(&[]);
        raw.extend(["a".to_string(), "b".to_string()]);
        let cli = cli(&raw);

        assert_eq!(cli.file, PathBuf::from(FILE));
        assert_eq!(cli.path, PathBuf::from(PATH));
        assert_eq!(cli.stuff, vec!["a", "b"]);
    }

    #[test]
    fn sample_options() {
        let options = cli(&argv(&[
            "--choice",
            "BET",
            "-f",
            "-m",
            "x",
            "--multiple",
            "y",
            "-M",
            "1",
            "2.5",
            "3",
            "--option",
            "7",
            "--secret",
            "hush",
        ]))
        .options();

        assert_eq!(options.choice, Some(Choice::Bet));
        assert!(options.flag);
        assert_eq!(options.multiple, vec!["x", "y"]);
        assert_eq!(options.multivalue, Some([1.0, 2.5, 3.0]));
        assert_eq!(options.option, 7);
        assert_eq!(options.secret.as_deref(), Some("hush"));
    }

    #[test]
    fn last_bool_flag_switch_wins() {
        let on = cli(&argv(&["--no-bool-flag", "--bool-flag"])).options();
        let off = cli(&argv(&["--bool-flag", "--no-bool-flag"])).options();

        assert!(on.bool_flag);
        assert!(!off.bool_flag);
    }

    #[test]
    fn last_feature_switch_wins() {
        let a = cli(&argv(&["--feature-b", "--feature-a"])).options();
        let b = cli(&argv(&["--feature-a", "--feature-b"])).options();

        assert_eq!(a.feature, Some(Feature::A));
        assert_eq!(b.feature, Some(Feature::B));
    }

    #[test]
    fn range_is_clamped() {
        assert_eq!(cli(&argv(&["-r", "99"])).options().range, Some(10));
        assert_eq!(cli(&argv(&["--range=-5"])).options().range, Some(0));
        assert_eq!(cli(&argv(&["-r", "4"])).options().range, Some(4));
    }

    #[test]
    fn verbose_is_counted() {
        assert_eq!(cli(&argv(&["-vvv"])).options().verbose, 3);
    }

    #[test]
    fn invalid_choice_is_rejected() {
        let result = Cli::try_parse_from(["mitfixins", "--choice", "DEL", FILE, PATH]);
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_rejected() {
        let result = Cli::try_parse_from(["mitfixins", "/definitely/not/here", PATH]);
        assert!(result.is_err());
    }

    #[test]
    fn multivalue_tuple_defaults() {
        let options = cli(&argv(&[])).options();
        assert_eq!(options.multivalue_tuple, (false, "nada".to_string(), 0));
    }

    #[test]
    fn multivalue_tuple_takes_three_typed_values() {
        let options = cli(&argv(&["-T", "yes", "word", "7"])).options();
        assert_eq!(options.multivalue_tuple, (true, "word".to_string(), 7));
    }

    #[test]
    fn multivalue_tuple_rejects_bad_boolean() {
        let result = Cli::try_parse_from_iter(["mitfixins", "-T", "maybe", "x", "1", FILE, PATH]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn multivalue_tuple_rejects_bad_integer() {
        let result = Cli::try_parse_from_iter(["mitfixins", "-T", "no", "x", "many", FILE, PATH]);
        assert!(result.is_err());
    }

    #[test]
    fn help_texts_keep_trailing_period() {
        let descriptors = Cli::option_descriptors();
        let option = descriptors.iter().find(|d| d.name == "option").unwrap();

        assert_eq!(option.help, "A sample option.");
    }

    #[test]
    fn version_names_command_and_license() {
        let error = Cli::try_parse_from_iter(["mitfixins", "-V"]).unwrap_err();
        let text = error.to_string();

        assert_eq!(error.kind(), ErrorKind::DisplayVersion);
        assert!(text.starts_with(&format!("mitfixins version {}", env!("CARGO_PKG_VERSION"))));
        assert!(text.contains("Licensed under the GPLv3"));
    }

    #[test]
    fn unknown_switch_is_rejected() {
        let result = Cli::try_parse_from(["mitfixins", "--kannotbe", FILE, PATH]);
        assert!(result.is_err());
    }
}

mod precedence {
    use super::*;

    #[test]
    fn file_overrides_defaults() {
        let options = resolve(&[], "option = 13\nflag = true\nmultiple = [\"f\"]");

        assert_eq!(options.option, 13);
        assert!(options.flag);
        assert_eq!(options.multiple, vec!["f"]);
    }

    #[test]
    fn explicit_default_value_beats_file() {
        let options = resolve(&["--option", "42"], "option = 13");
        assert_eq!(options.option, 42);
    }

    #[test]
    fn bundled_short_switches_beat_file() {
        let options = resolve(&["-fDo", "5"], "option = 13\nflag = false");

        assert!(options.flag);
        assert!(options.dry_run);
        assert_eq!(options.option, 5);
    }

    #[test]
    fn negating_switch_beats_file() {
        let options = resolve(&["--no-bool-flag"], "bool_flag = true");
        assert!(!options.bool_flag);
    }

    #[test]
    fn file_selects_enums() {
        let options = resolve(&[], "choice = \"GAM\"\nfeature = \"b\"");

        assert_eq!(options.choice, Some(Choice::Gam));
        assert_eq!(options.feature, Some(Feature::B));
    }

    #[test]
    fn file_sets_multivalue_tuple() {
        let options = resolve(&[], "multivalue_tuple = [true, \"file\", 3]");
        assert_eq!(options.multivalue_tuple, (true, "file".to_string(), 3));
    }

    #[test]
    fn command_line_multivalue_tuple_beats_file() {
        let options = resolve(
            &["--multivalue-tuple", "off", "cli", "9"],
            "multivalue_tuple = [true, \"file\", 3]",
        );
        assert_eq!(options.multivalue_tuple, (false, "cli".to_string(), 9));
    }

    #[test]
    fn file_range_is_clamped() {
        let options = resolve(&[], "range = 50");
        assert_eq!(options.range, Some(10));
    }

    #[test]
    fn sources_are_reported() {
        let raw = argv(&["-o", "1"]);
        let cli = cli(&raw);
        let descriptors = Cli::option_descriptors();

        let resolved = cli
            .resolve(&descriptors, &file("flag = true\nextra = 1"), &raw)
            .unwrap();

        assert_eq!(resolved.sources["option"], ValueSource::CommandLine);
        assert_eq!(resolved.sources["flag"], ValueSource::File);
        assert_eq!(resolved.sources["choice"], ValueSource::Default);
        assert_eq!(resolved.ignored, vec!["extra".to_string()]);
    }

    #[test]
    fn positional_values_do_not_count_as_switches() {
        // FILE and PATH never start with `-`, so they never look like switches.
        let options = resolve(&[], "verbose = 2");
        assert_eq!(options.verbose, 2);
    }
}

mod typed_options {
    use super::*;

    #[test]
    fn wrong_type_in_file_is_rejected() {
        let raw = argv(&[]);
        let cli = cli(&raw);
        let descriptors = Cli::option_descriptors();
        let resolved = cli
            .resolve(&descriptors, &file("option = \"many\""), &raw)
            .unwrap();

        let result = CommandOptions::from_settings(&resolved.settings);

        assert!(matches!(result, Err(ConfigError::InvalidSettings(_))));
    }

    #[test]
    fn multivalue_needs_three_items() {
        let raw = argv(&[]);
        let cli = cli(&raw);
        let descriptors = Cli::option_descriptors();
        let resolved = cli
            .resolve(&descriptors, &file("multivalue = [1.0, 2.0]"), &raw)
            .unwrap();

        assert!(CommandOptions::from_settings(&resolved.settings).is_err());
    }

    #[test]
    fn default_table_skips_unset_options() {
        let defaults = CommandOptions::default_table();

        assert_eq!(defaults.get("option"), Some(&Value::Integer(42)));
        assert_eq!(defaults.get("multiple"), Some(&Value::Array(Vec::new())));
        assert!(!defaults.contains_key("choice"));
        assert!(!defaults.contains_key("config_file"));
    }

    #[test]
    fn dry_run_implies_verbosity() {
        let quiet = CommandOptions::default();
        let dry = CommandOptions {
            dry_run: true,
            ..CommandOptions::default()
        };
        let loud = CommandOptions {
            dry_run: true,
            verbose: 9,
            ..CommandOptions::default()
        };

        assert_eq!(quiet.effective_verbosity(), 0);
        assert_eq!(dry.effective_verbosity(), 1);
        assert_eq!(loud.effective_verbosity(), 3);
    }
}

mod effective_config {
    use super::*;

    /// Runs the `--print-config` path: parse, load the file, resolve, render.
    fn print_config(args: &[&str], file_content: &str) -> String {
        let dir = tempdir().unwrap();
        let config = dir.path().join("mitfixins.toml");
        fs::write(&config, file_content).unwrap();
        let config = config.display().to_string();

        let mut all: Vec<&str> = vec!["-C", &config, "--print-config"];
        all.extend_from_slice(args);
        let raw = argv(&all);
        let cli = cli(&raw);
        let descriptors = Cli::option_descriptors();
        let file_settings = load_file_settings(cli.config_file.as_deref()).unwrap();
        let resolved = cli.resolve(&descriptors, &file_settings, &raw).unwrap();

        Cli::render_effective_config(&resolved.settings).unwrap()
    }

    fn has_setting(rendered: &str, name: &str) -> bool {
        let prefix = format!("{name} =");
        rendered
            .lines()
            .any(|line| line.trim_start_matches("# ").starts_with(&prefix))
    }

    #[test]
    fn excludes_switch_only_options() {
        let rendered = print_config(&[], "[mitfixins]\noption = 13\n");

        for name in ["config_file", "print_config", "help", "version"] {
            assert!(!has_setting(&rendered, name), "{name} rendered:\n{rendered}");
        }
    }

    #[test]
    fn file_value_is_active() {
        let rendered = print_config(&[], "[mitfixins]\noption = 13\n");

        assert!(rendered.contains("\n# A sample option.\noption = 13\n"));
        assert!(!rendered.contains("# option = 42"));
    }

    #[test]
    fn default_tuple_is_commented_out() {
        let rendered = print_config(&[], "");

        assert!(rendered.contains("\n# multivalue_tuple = [false, \"nada\", 0]\n"));
    }

    #[test]
    fn explicit_tuple_is_active() {
        let rendered = print_config(&["-T", "true", "word", "7"], "");

        assert!(rendered.contains("\nmultivalue_tuple = [true, \"word\", 7]\n"));
    }

    #[test]
    fn rendered_config_loads_back() {
        let rendered = print_config(&["-o", "5", "-m", "x"], "[mitfixins]\nflag = true\n");

        let loaded: Table = toml::from_str(&rendered).unwrap();
        let section = loaded["mitfixins"].as_table().unwrap();
        let settings: Settings = section
            .iter()
            .map(|(name, value)| (name.clone(), Some(value.clone())))
            .collect();
        let options = CommandOptions::from_settings(&settings).unwrap();

        assert_eq!(options.option, 5);
        assert_eq!(options.multiple, vec!["x"]);
        assert!(options.flag);
        assert_eq!(options.multivalue_tuple, (false, "nada".to_string(), 0));
    }
}
