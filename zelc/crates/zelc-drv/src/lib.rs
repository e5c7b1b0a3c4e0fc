//! zelc-drv - Compiler Driver
//!
//! The driver wires the lexer phase to the command line: argument parsing,
//! localization resource loading, diagnostic context setup, token output,
//! and exit codes. Later compiler phases will slot in behind the same
//! dispatch once they exist.
//!
//! Library surface: [`LexerPhase`] with its typed [`PhaseError`]s, and the
//! token formatters. The `zelc` binary is a thin wrapper over [`run`].

mod output;
mod phase;

pub use output::{format_tokens_json, format_tokens_text};
pub use phase::{LexOutcome, LexerOptions, LexerPhase, Limits, PhaseError};

use std::path::PathBuf;

use anyhow::Context;

use zelc_diag::i18n::Locale;
use zelc_diag::{
    AnsiStyle, DiagConfig, DiagContext, JsonEmitter, TextEmitter, Translator,
};
use zelc_lex::{report_errors, LexerSourceLocator};

/// Driver configuration, parsed from the command line.
#[derive(Clone, Debug)]
pub struct Config {
    /// The input file
    pub input: Option<PathBuf>,
    /// Emit machine-readable JSON instead of text
    pub json: bool,
    /// Preserve trivia on tokens
    pub trivia: bool,
    /// Diagnostic locale (e.g. "en", "zh-CN")
    pub locale: Locale,
    /// Colored diagnostics
    pub color: bool,
    /// Maximum errors before suppression (0 = unlimited)
    pub max_errors: usize,
    /// Treat warnings as errors
    pub werror: bool,
    /// Show help and exit
    pub help: bool,
    /// Show version and exit
    pub version: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            json: false,
            trivia: false,
            locale: Locale::En,
            color: true,
            max_errors: 0,
            werror: false,
            help: false,
            version: false,
        }
    }
}

/// Parse command line arguments (binary name excluded).
pub fn parse_args(args: &[String]) -> Result<Config, String> {
    let mut config = Config::default();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();

        match arg {
            "--help" | "-h" => {
                config.help = true;
                return Ok(config);
            },
            "--version" | "-V" => {
                config.version = true;
                return Ok(config);
            },
            "--json" => config.json = true,
            "--trivia" => config.trivia = true,
            "--no-color" => config.color = false,
            "-Werror" => config.werror = true,
            "--locale" => {
                i += 1;
                let value = args.get(i).ok_or("missing argument for --locale")?;
                config.locale = Locale::parse(value);
            },
            "--max-errors" => {
                i += 1;
                let value = args.get(i).ok_or("missing argument for --max-errors")?;
                config.max_errors = value
                    .parse()
                    .map_err(|_| format!("invalid value for --max-errors: {value}"))?;
            },
            _ if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}"));
            },
            _ => {
                if config.input.is_some() {
                    return Err("only one input file is supported".to_string());
                }
                config.input = Some(PathBuf::from(arg));
            },
        }
        i += 1;
    }

    Ok(config)
}

/// Print the usage message.
pub fn print_help() {
    println!("Zel Compiler v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: zelc [OPTIONS] <input file>");
    println!();
    println!("Options:");
    println!("  -h, --help           Print this help message");
    println!("  -V, --version        Print version information");
    println!("  --json               Emit tokens as JSON");
    println!("  --trivia             Preserve whitespace/comment trivia on tokens");
    println!("  --locale <LOCALE>    Diagnostic language (en, zh-CN, zh-TW, ja)");
    println!("  --no-color           Disable colored diagnostics");
    println!("  --max-errors <N>     Stop printing diagnostics after N errors");
    println!("  -Werror              Treat warnings as errors");
    println!();
    println!("Examples:");
    println!("  zelc hello.zl             Lex hello.zl and print the tokens");
    println!("  zelc --json hello.zl      Same, as JSON");
}

/// Print the version line.
pub fn print_version() {
    println!("zelc {}", env!("CARGO_PKG_VERSION"));
}

/// Load the localization resources for a locale.
///
/// Tries a documented set of relative paths; a missing resource file is
/// silent and lookups fall back to untranslated defaults.
pub fn load_translations(locale: Locale) -> Translator {
    let translator = Translator::new();

    let mut names = vec!["en".to_string()];
    if locale != Locale::En {
        names.push(locale.as_str().to_string());
    }

    for name in &names {
        let file_locale = Locale::parse(name);
        let relative = format!("resources/i18n/{name}.toml");
        let mut candidates = vec![
            PathBuf::from(&relative),
            PathBuf::from("..").join(&relative),
            PathBuf::from("../..").join(&relative),
        ];
        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(&relative));
        }

        for path in candidates {
            if translator.load_from_file(file_locale, &path) {
                break;
            }
        }
    }

    translator.set_locale(locale);
    translator
}

/// Run the driver; returns the process exit code.
pub fn run(args: &[String]) -> anyhow::Result<i32> {
    let config = match parse_args(args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            return Ok(2);
        },
    };

    if config.help {
        print_help();
        return Ok(0);
    }
    if config.version {
        print_version();
        return Ok(0);
    }

    let Some(input) = config.input.clone() else {
        eprintln!("error: no input file provided");
        return Ok(2);
    };

    let translator = load_translations(config.locale);
    let diag_config = DiagConfig {
        max_errors: config.max_errors,
        treat_warnings_as_errors: config.werror,
        ..DiagConfig::default()
    };

    let style = if config.color && !config.json {
        AnsiStyle::default()
    } else {
        AnsiStyle::plain()
    };
    let dcx = if config.json {
        DiagContext::with_translator(
            Box::new(JsonEmitter::new(std::io::stderr())),
            diag_config,
            translator,
        )
    } else {
        DiagContext::with_translator(
            Box::new(TextEmitter::new(std::io::stderr(), style)),
            diag_config,
            translator,
        )
    };

    let options = LexerOptions {
        preserve_trivia: config.trivia,
        ..LexerOptions::default()
    };
    let mut lexer_phase = LexerPhase::new(options);

    let outcome = lexer_phase
        .run_on_file(&input)
        .with_context(|| format!("lexing {} failed", input.display()))?;

    let sm = lexer_phase.source_manager();
    let rendered = if config.json {
        format_tokens_json(&outcome.tokens, sm)
    } else {
        format_tokens_text(&outcome.tokens, sm)
    };
    println!("{rendered}");

    if outcome.has_errors {
        let locator = LexerSourceLocator::new(sm);
        let _guarantee = report_errors(&outcome.errors, &dcx, Some(&locator));
        dcx.emit_summary();
        dcx.flush();
        return Ok(1);
    }

    dcx.flush();
    Ok(0)
}
