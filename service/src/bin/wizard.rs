#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout)]

use std::io::{self, BufRead, Write};

use badgervoice_api::config::Config;
use badgervoice_api::roster::{load_directory, HttpRosterSource};
use badgervoice_api::validation::FormInput;
use badgervoice_api::wizard::{Wizard, WizardError};
use bv_directory::Legislator;
use bv_letters::Topic;
use clap::Parser;

#[derive(Parser)]
#[command(name = "wizard")]
#[command(about = "Write your Wisconsin legislators from the terminal")]
struct Args {
    /// Path to the YAML config file.
    #[arg(long, default_value = "config.yaml")]
    config: String,
}

#[tokio::main]
#[allow(clippy::too_many_lines)]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = Config::load_from(&args.config)?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("BadgerVoice letter wizard");
    println!(
        "Fetching the legislator roster from {}",
        config.directory.base_url
    );

    let source = HttpRosterSource::new(config.directory.clone());
    let directory = loop {
        match load_directory(&source, config.directory.load_timeout()).await {
            Ok(directory) => break directory,
            Err(err) => {
                println!("Fatal: {err}");
                if !prompt_yes_no(&mut lines, "Retry the download? [y/N] ")? {
                    return Err(err.into());
                }
            }
        }
    };
    println!(
        "Loaded {} senators, {} assembly members and {} districts.",
        directory.senators().len(),
        directory.assembly_members().len(),
        directory.districts().len()
    );

    let mut wizard = Wizard::new(directory);

    'session: loop {
        wizard.reset();

        // Step 1: collect contact information until it validates and resolves.
        let resolution = loop {
            println!();
            println!("Step 1 of 3: your contact information");
            let first_name = prompt(&mut lines, "First name: ")?;
            let last_name = prompt(&mut lines, "Last name: ")?;
            let address = prompt(&mut lines, "Wisconsin street address (with ZIP): ")?;

            let input = FormInput {
                first_name,
                last_name,
                address,
            };
            match wizard.submit_info(&input) {
                Ok(resolution) => break resolution,
                Err(err @ (WizardError::Validation(_) | WizardError::Resolve(_))) => {
                    println!("{err}");
                }
                Err(err) => return Err(err.into()),
            }
        };

        // Step 2: show who represents that address.
        println!();
        println!("Step 2 of 3: your elected officials");
        print_official(&resolution.senator);
        print_official(&resolution.representative);

        // Step 3: pick one of the prewritten letters.
        let letter = loop {
            println!();
            println!("Step 3 of 3: choose a letter");
            for topic in Topic::ALL {
                println!("  {:<10} {}", topic.key(), topic.letter().title);
            }
            let raw = prompt(&mut lines, "Topic (or 'restart' to start over): ")?;
            if raw.eq_ignore_ascii_case("restart") {
                continue 'session;
            }
            match raw.parse::<Topic>() {
                Ok(topic) => break wizard.choose_letter(topic)?,
                Err(err) => println!("{err}"),
            }
        };

        println!();
        println!("Selected \"{}\".", letter.title);
        match wizard.compose() {
            Ok(link) => {
                println!("Open this link to start the email in your mail client:");
                println!();
                println!("  {}", link.uri);
                println!();
                println!("Addressed to {}.", link.recipients.join(" and "));
            }
            Err(err) => println!("Could not build the mailto link: {err}"),
        }

        if !prompt_yes_no(&mut lines, "Write another letter? [y/N] ")? {
            break;
        }
    }

    println!("Goodbye.");
    Ok(())
}

fn print_official(legislator: &Legislator) {
    let contact = if legislator.email.is_empty() {
        "no email on file"
    } else {
        &legislator.email
    };
    println!(
        "  {} {} ({}), district {}, {}",
        legislator.chamber.member_title(),
        legislator.full_name(),
        legislator.party.label(),
        legislator.district,
        contact
    );
}

fn prompt(lines: &mut io::Lines<io::StdinLock<'static>>, text: &str) -> io::Result<String> {
    print!("{text}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(line?.trim().to_string()),
        None => Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stdin closed before the wizard finished",
        )),
    }
}

fn prompt_yes_no(lines: &mut io::Lines<io::StdinLock<'static>>, text: &str) -> io::Result<bool> {
    let answer = prompt(lines, text)?;
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}
