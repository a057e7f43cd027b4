mod opt;

use std::io::{self, Write};
use std::process;

use colored::*;
use opt::Opt;
use structopt::StructOpt;

use xsshunter::extractor;
use xsshunter::prober;
use xsshunter::recorder::Workspace;
use xsshunter::target::Target;
use xsshunter::utils::{build_client, DEFAULT_TIMEOUT};

#[tokio::main]
async fn main() {
    let opt = Opt::from_args();
    if opt.verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info)
            .init();
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    println!("{}", "XSS HUNTER - Starting scan...".green().bold());

    let raw_target = match opt.target {
        Some(target) => target,
        None => match prompt_target() {
            Ok(target) => target,
            Err(e) => {
                eprintln!("{} Could not read target: {}", "[!]".red().bold(), e);
                process::exit(1);
            }
        },
    };

    let target = match Target::resolve(&raw_target) {
        Ok(target) => target,
        Err(e) => {
            eprintln!("{} {}", "[!]".red().bold(), e);
            process::exit(1);
        }
    };

    let workspace = match Workspace::create(&opt.output, &target.host) {
        Ok(workspace) => workspace,
        Err(e) => {
            eprintln!("{} {}", "[!]".red().bold(), e);
            process::exit(1);
        }
    };

    let client = match build_client(DEFAULT_TIMEOUT) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{} Failed to build HTTP client: {}", "[!]".red().bold(), e);
            process::exit(1);
        }
    };

    let index = match extractor::extract(&client, &target).await {
        Ok(index) => index,
        Err(e) => {
            // Probing needs a reachable landing page; stop here for this
            // target but exit cleanly.
            println!("{} Crawl failed: {}", "[!]".red(), e);
            return;
        }
    };

    if let Err(e) = workspace.write_parameter_report(&index) {
        println!("{} Could not write parameter report: {}", "[!]".red(), e);
    }
    println!(
        "{} Found {} endpoints with parameters.",
        "[+]".green(),
        index.len()
    );

    let findings = prober::probe(&client, &target, &index, &workspace).await;
    println!(
        "{} Scan complete: {} finding(s) recorded in {}",
        "[+]".green(),
        findings.len(),
        workspace.base_dir().display()
    );
}

fn prompt_target() -> io::Result<String> {
    print!("Enter target (e.g., example.com): ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
