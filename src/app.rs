use std::io::{IsTerminal, Write};
use std::time::Duration;

use clap::{error::ErrorKind, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::fs::OpenOptions;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::cli::args::CliArgs;
use crate::cli::commands::{self, Command};
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::controller::{ConsoleNotifier, ListController, LoadState, Notifier};
use crate::model::Record;
use crate::output::{self, OutputFormat, Renderer, TerminalRenderer};
use crate::runner::{Options, Runner};
use crate::source::{RecordSource, DEFAULT_SOURCE_URL};

fn print_banner() {
    println!(
        "{} {}",
        "adminlist".bold().white(),
        concat!("v", env!("CARGO_PKG_VERSION")).white()
    );
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

fn print_warning(message: &str) {
    println!(
        "{}{}{} {}",
        "[".bold().white(),
        "WRN".bold().yellow(),
        "]".bold().white(),
        message
    );
}

fn log_filter(verbose: u8, configured: Option<&str>) -> String {
    match verbose {
        0 => configured.unwrap_or("warn").to_ascii_lowercase(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn init_tracing(filter: &str) -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| error.to_string())
}

#[derive(Clone, Debug)]
struct RunConfig {
    source: RecordSource,
    timeout: Option<usize>,
    proxy: Option<String>,
    header: Option<String>,
    no_color: bool,
    script: Option<String>,
    output: Option<String>,
    output_format: Option<OutputFormat>,
    log_filter: String,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    // cli source beats config source; a file beats a url within one layer
    let source = if let Some(path) = args.input_file {
        RecordSource::FilePath(config::expand_tilde_string(&path))
    } else if let Some(url) = args.url {
        RecordSource::Url(url.trim().to_string())
    } else if let Some(path) = cfg.input_file {
        RecordSource::FilePath(config::expand_tilde_string(&path))
    } else {
        let url = cfg
            .url
            .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string())
            .trim()
            .to_string();
        crate::utils::parse_http_url(&url).map_err(|e| format!("invalid url '{url}': {e}"))?;
        RecordSource::Url(url)
    };

    let timeout = args.timeout.or(cfg.timeout).filter(|t| *t > 0);
    let proxy = args.proxy.or(cfg.proxy).filter(|p| !p.trim().is_empty());
    let header = args.header.or(cfg.header).filter(|h| !h.trim().is_empty());

    let script = args
        .script
        .or(cfg.script)
        .map(|p| config::expand_tilde_string(&p));
    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => Some(
            OutputFormat::parse(&raw).ok_or_else(|| format!("invalid output format '{raw}'"))?,
        ),
        None => None,
    };

    let log_filter = log_filter(args.verbose, cfg.log_level.as_deref());

    Ok(RunConfig {
        source,
        timeout,
        proxy,
        header,
        no_color,
        script,
        output,
        output_format,
        log_filter,
    })
}

fn source_label(source: &RecordSource) -> String {
    match source {
        RecordSource::Url(url) => url.clone(),
        RecordSource::FilePath(path) => path.clone(),
        RecordSource::Inline(records) => format!("{} inline records", records.len()),
    }
}

fn resolve_format(path: &str, explicit: Option<OutputFormat>) -> OutputFormat {
    explicit
        .or_else(|| output::infer_format_from_path(path))
        .unwrap_or(OutputFormat::Text)
}

async fn write_export(
    path: &str,
    format: OutputFormat,
    records: &[Record],
) -> Result<(), String> {
    let rendered = output::render(records, format);
    let mut outfile = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .await
        .map_err(|e| format!("failed to open output file: {e}"))?;
    outfile
        .write_all(&rendered)
        .await
        .map_err(|e| format!("failed to write output file: {e}"))?;
    tracing::info!(path, records = records.len(), "export written");
    Ok(())
}

async fn run_session<N, R, I>(
    controller: &mut ListController<N>,
    renderer: &mut R,
    input: I,
    prompt: bool,
) -> Result<(), String>
where
    N: Notifier,
    R: Renderer,
    I: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        if prompt {
            print!("adminlist> ");
            let _ = std::io::stdout().flush();
        }
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(format!("failed to read commands: {e}")),
        };
        let command = match commands::parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                print_warning(&e);
                continue;
            }
        };
        match command {
            Command::Apply(action) => {
                controller.dispatch(action);
                renderer.render(&controller.snapshot());
            }
            Command::Show => renderer.render(&controller.snapshot()),
            Command::Export { path, format } => {
                let path = config::expand_tilde_string(&path);
                let records: Vec<Record> = controller
                    .state()
                    .active_view()
                    .into_iter()
                    .cloned()
                    .collect();
                if let Err(e) = write_export(&path, resolve_format(&path, format), &records).await
                {
                    print_warning(&e);
                }
            }
            Command::Help => print!("{}", commands::COMMAND_HELP),
            Command::Quit => break,
        }
    }
    Ok(())
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    print_banner();
    format_kv_line("Source", &source_label(&run.source));
    if let Some(timeout) = run.timeout {
        format_kv_line("Timeout", &format!("{timeout}s"));
    }
    if let Some(script) = run.script.as_deref() {
        format_kv_line("Script", script);
    }
    println!();

    let runner = Runner::new(Options {
        source: run.source.clone(),
        timeout_seconds: run.timeout,
        proxy: run.proxy.clone(),
        header: run.header.clone(),
    })
    .map_err(|e| e.to_string())?;

    let mut renderer = TerminalRenderer;

    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(output::terminal::LOADING_MESSAGE);
    pb.enable_steady_tick(Duration::from_millis(120));
    let mut controller = runner.load(ConsoleNotifier).await;
    pb.finish_and_clear();

    renderer.render(&controller.snapshot());
    if let LoadState::Failed(_) = controller.load_state() {
        return Ok(());
    }

    match run.script.as_deref() {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .map_err(|e| format!("failed to open script file: {e}"))?;
            run_session(&mut controller, &mut renderer, BufReader::new(file), false).await?;
        }
        None => {
            println!("{}", "type 'help' for commands".dimmed());
            let prompt = std::io::stdin().is_terminal();
            let stdin = BufReader::new(tokio::io::stdin());
            run_session(&mut controller, &mut renderer, stdin, prompt).await?;
        }
    }

    if let Some(path) = run.output.as_deref() {
        let records = controller.state().store().records();
        write_export(path, resolve_format(path, run.output_format), records).await?;
    }

    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));
    if args.init_config {
        let path = user_config_path
            .or_else(config::default_config_path)
            .ok_or_else(|| "cannot determine config path".to_string())?;
        let state = if config::ensure_default_config_file(&path)? {
            "created"
        } else {
            "already exists"
        };
        format_kv_line("Config", &format!("{} ({state})", path.display()));
        return Ok(());
    }
    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;
    init_tracing(&run.log_filter)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}

#[cfg(test)]
mod cli_tests {
    use super::*;
    use crate::controller::Notice;

    #[test]
    fn cli_url_overrides_config_file_source() {
        let args = CliArgs::parse_from(["adminlist", "-u", "https://host.tld/users.json"]);
        let cfg = ConfigFile {
            input_file: Some("./members.json".to_string()),
            ..ConfigFile::default()
        };
        let run = build_run_config(args, cfg).unwrap();
        assert!(matches!(run.source, RecordSource::Url(ref u) if u == "https://host.tld/users.json"));
    }

    #[test]
    fn default_source_is_members_endpoint() {
        let args = CliArgs::parse_from(["adminlist"]);
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        assert!(matches!(run.source, RecordSource::Url(ref u) if u == DEFAULT_SOURCE_URL));
        assert_eq!(run.timeout, None);
        assert_eq!(run.log_filter, "warn");
    }

    #[test]
    fn url_and_input_file_conflict() {
        let args = CliArgs::parse_from([
            "adminlist",
            "-u",
            "https://host.tld/users.json",
            "-i",
            "./members.json",
        ]);
        assert!(build_run_config(args, ConfigFile::default()).is_err());
    }

    #[test]
    fn color_flag_overrides_config_no_color() {
        let args = CliArgs::parse_from(["adminlist", "--color"]);
        let cfg = ConfigFile {
            no_color: Some(true),
            ..ConfigFile::default()
        };
        assert!(!build_run_config(args, cfg).unwrap().no_color);
    }

    #[test]
    fn verbosity_beats_configured_level() {
        assert_eq!(log_filter(0, Some("INFO")), "info");
        assert_eq!(log_filter(2, Some("info")), "debug");
        assert_eq!(log_filter(5, None), "trace");
    }

    #[derive(Default)]
    struct Frames(Vec<crate::controller::RenderModel>);

    impl Renderer for Frames {
        fn render(&mut self, model: &crate::controller::RenderModel) {
            self.0.push(model.clone());
        }
    }

    #[tokio::test]
    async fn script_drives_the_controller() {
        let mut controller = ListController::new(Vec::<Notice>::new());
        controller.finish_load(Ok::<_, String>(
            (1..=12)
                .map(|i| Record::new(i.to_string(), format!("u{i}"), format!("u{i}@mail.com"), "member"))
                .collect(),
        ));
        let script = "# go to the end\nlast\nall\ndelete-selected\nbogus\nshow\nquit\nnext\n";
        let mut frames = Frames::default();
        run_session(&mut controller, &mut frames, script.as_bytes(), false)
            .await
            .unwrap();

        assert_eq!(frames.0.len(), 4);
        let last = frames.0.last().unwrap();
        assert_eq!(last.current_page, 1);
        assert_eq!(last.total_pages, 1);
        assert_eq!(last.total_records, 10);
        assert_eq!(
            controller.notifier(),
            &vec![Notice::success(crate::controller::MSG_DELETED_SELECTED)]
        );
    }
}
