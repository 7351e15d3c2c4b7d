use clap::{Parser, ValueEnum};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Context, Editor};
use toikake::prefix::DEFAULT_PREFIX_FORMAT;
use toikake::prelude::*;
use std::result::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BytesCli {
    Raw,
    Base64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputCli {
    Text,
    Json,
}

/// Build a request message interactively from a schema
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the schema definition JSON file
    schema_path: String,
    /// Message to build, fully qualified or relative to the schema package
    message: String,

    /// Prompt template; supports {ancestor}, {name} and {type}
    #[arg(long, default_value = DEFAULT_PREFIX_FORMAT)]
    prefix: String,

    /// How bytes fields are typed in
    #[arg(long, value_enum, default_value = "raw")]
    bytes: BytesCli,

    /// Output format of the built message
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputCli,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

// --- Line editor prompt ---

/// Completes the current selection's choices.
#[derive(Default)]
struct ChoiceHelper {
    choices: Vec<String>,
}

impl rustyline::Helper for ChoiceHelper {}

impl rustyline::highlight::Highlighter for ChoiceHelper {}

impl rustyline::hint::Hinter for ChoiceHelper {
    type Hint = String;
    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl rustyline::validate::Validator for ChoiceHelper {}

impl rustyline::completion::Completer for ChoiceHelper {
    type Candidate = rustyline::completion::Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let prefix = &line[..pos];
        let pairs = self
            .choices
            .iter()
            .filter(|choice| choice.starts_with(prefix))
            .map(|choice| rustyline::completion::Pair {
                display: choice.clone(),
                replacement: choice.clone(),
            })
            .collect();
        Ok((0, pairs))
    }
}

struct LinePrompt {
    editor: Editor<ChoiceHelper, DefaultHistory>,
}

impl LinePrompt {
    fn new() -> Result<Self, ReadlineError> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(ChoiceHelper::default()));
        Ok(Self { editor })
    }

    fn read(&mut self, prompt: &str, choices: &[String]) -> Result<String, PromptError> {
        if let Some(helper) = self.editor.helper_mut() {
            helper.choices = choices.to_vec();
        }
        match self.editor.readline(&format!("{}: ", prompt)) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => Err(PromptError::Cancelled),
            Err(e) => Err(PromptError::Io(e.to_string())),
        }
    }
}

impl Prompt for LinePrompt {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.read(prompt, &[])
    }

    fn read_selection(&mut self, prompt: &str, choices: &[String]) -> Result<String, PromptError> {
        println!("{}", choices.join("  "));
        let answer = self.read(prompt, choices)?;
        Ok(answer.trim().to_string())
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let schema = SchemaDefinition::from_file(&cli.schema_path)
        .and_then(IntoSchema::into_schema)
        .unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to load schema '{}': {}",
                cli.schema_path, e
            ))
        });

    let prompt = LinePrompt::new()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to start line editor: {}", e)));
    let bytes = match cli.bytes {
        BytesCli::Raw => BytesEncoding::Raw,
        BytesCli::Base64 => BytesEncoding::Base64,
    };
    let mut inputter = Inputter::builder(&schema, prompt)
        .with_prefix_format(&cli.prefix)
        .with_bytes_encoding(bytes)
        .build();

    let message = match inputter.input_by_name(&cli.message) {
        Ok(message) => message,
        Err(e) if e.is_cancelled() => {
            eprintln!("\nCancelled.");
            std::process::exit(130);
        }
        Err(e) => exit_with_error(&e.to_string()),
    };

    match cli.output {
        OutputCli::Text => println!("{}", message),
        OutputCli::Json => match serde_json::to_string_pretty(&message.to_json()) {
            Ok(json) => println!("{}", json),
            Err(e) => exit_with_error(&format!("Failed to render JSON: {}", e)),
        },
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
