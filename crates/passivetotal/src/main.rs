use clap::{Arg, ArgAction, Command};
use passivetotal::config::{Settings, DEFAULT_BASE_URL};
use passivetotal::credentials::EnvCredentials;
use passivetotal::integrations::{self, Context};
use passivetotal::lookup::lookup;
use passivetotal::model::{
    ensure_dir, export_to_json, export_to_markdown, Itype, Outcome, Report,
};
use passivetotal::utils::log::init_tracing_subscriber;
use passivetotal::{Error, Result};
use reqwest::Client;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, error, info};

// timeouts
const HTTP_REQUEST_TIMEOUT_MS: u64 = 10000;

// the CLI runs every lookup as a single operator
const CLI_USER: &str = "cli";

fn main() -> Result<()> {
    let cli = Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .subcommand(Command::new("modules").about("List all integrations"))
        .subcommand(Command::new("cards").about("Print the display card of every integration"))
        .subcommand(
            Command::new("lookup")
                .about("Enrich an indicator with every matching integration")
                .arg(
                    Arg::new("query")
                        .help("The domain or IP to look up")
                        .value_name("QUERY")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("itype")
                        .short('t')
                        .long("itype")
                        .help("Indicator type, detected when omitted")
                        .value_name("ITYPE")
                        .value_parser(["domain", "ip"]),
                )
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .help("PassiveTotal api base url")
                        .value_name("URL")
                        .default_value(DEFAULT_BASE_URL),
                )
                .arg(
                    Arg::new("verbose")
                        .short('v')
                        .long("verbose")
                        .action(ArgAction::Count)
                        .help("Increase diagnostic output (-vv logs provider 404s)"),
                )
                .arg(
                    Arg::new("logs")
                        .short('s')
                        .long("logs")
                        .action(ArgAction::SetTrue)
                        .help("Save logs into a .log file"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Output format")
                        .value_name("OUTPUT")
                        .value_parser(["json", "md", "both"])
                        .default_value("both"),
                ),
        )
        .arg_required_else_help(true)
        .get_matches();

    match cli.subcommand() {
        Some(("modules", _)) => integrations::display_all(),
        Some(("cards", _)) => {
            for integration in integrations::all() {
                let descriptor = integrations::descriptor(integration.as_ref());
                println!("{}", serde_json::to_string_pretty(&descriptor)?);
            }
        }
        Some(("lookup", args)) => {
            let Some(query) = args.get_one::<String>("query") else {
                return Err(Error::CliUsage("Missing query".into()));
            };

            // the query becomes a path segment of the output dir, so it must pass validation
            let explicit = match args.get_one::<String>("itype") {
                Some(itype) => Some(itype.parse::<Itype>()?),
                None => None,
            };
            let itype = Itype::resolve(explicit, query)?;

            // create filename
            let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
            let filename = format!("{}", timestamp);

            // create output dir
            let output_dir = format!("output/passivetotal/{}", query);
            ensure_dir(output_dir.as_ref())?;

            let debug = args.get_count("verbose");
            let save_logs = args.get_flag("logs");
            init_tracing_subscriber(debug, save_logs, output_dir.as_ref(), &filename)?;

            let mut settings = Settings::default().with_debug(debug);
            if let Some(base_url) = args.get_one::<String>("base-url") {
                settings = settings.with_base_url(base_url.as_str());
            }

            info!("Looking up {} {} (run_{})", itype, query, timestamp);
            let reports = run_lookup(&settings, itype, query)?;

            for report in &reports {
                let summary = match &report.outcome {
                    Outcome::Success { count, .. } => format!("{} record(s)", count),
                    Outcome::Empty => "no data".to_string(),
                    Outcome::NotApplicable => "not configured".to_string(),
                    Outcome::Failed => "failed".to_string(),
                };
                println!("- {:20}{}", report.integration, summary);
            }

            // write result
            if let Some(format) = args.get_one::<String>("output") {
                if format == "both" || format == "json" {
                    let json_path = Path::new(&output_dir)
                        .join(&filename)
                        .with_extension("json");
                    export_to_json(&reports, &json_path)?;
                }

                if format == "both" || format == "md" {
                    let md_path = Path::new(&output_dir).join(filename).with_extension("md");
                    export_to_markdown(&reports, query, &md_path)?;
                }
            }
        }

        // fallback if a cmd is not handled (should not possible)
        _ => {
            error!("{:12} - Command not handled, exit program", "CLI ERROR");
            return Err(Error::CliUsage("Command not handled".into()));
        }
    }

    Ok(())
}

#[tokio::main]
async fn run_lookup(
    settings: &Settings,
    itype: Itype,
    query: &str,
) -> Result<Vec<Report>> {
    // create http client
    let http_timeout = Duration::from_millis(HTTP_REQUEST_TIMEOUT_MS);
    let http_client = Client::builder().timeout(http_timeout).build()?;
    debug!("HTTP Client created: {:?}", http_client);

    let credentials = EnvCredentials;
    let ctx = Context {
        http_client: &http_client,
        credentials: &credentials,
        settings,
    };

    Ok(lookup(&ctx, CLI_USER, itype, query).await)
}
