use clap::{Arg, Command};
use dotenv::dotenv;
use log::error;

use medcheck::prelude::*;
use medcheck::report::{render_identified, render_result};

fn required<'a>(matches: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .value_of(name)
        .ok_or_else(|| Error::precondition(format!("--{} is required", name)))
}

async fn show_details(controller: &mut WorkflowController<MedCheck>, names: Vec<String>) {
    for name in names {
        controller.view_drug_details(&name).await;
        if let Some(panel) = controller.details().panel() {
            println!("\n== {} ==\n{}", panel.title, panel.content.text());
        }
    }
    controller.close_details();
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    pretty_env_logger::init();

    let matches = Command::new("medcheck")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Identify medication on a photo and verify it against a prescription")
        .arg(
            Arg::new("drug-image")
                .short('d')
                .long("drug-image")
                .value_name("FILE")
                .help("Photo of the medication")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("prescription-image")
                .short('p')
                .long("prescription-image")
                .value_name("FILE")
                .help("Photo of the prescription")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("timing")
                .short('t')
                .long("timing")
                .value_name("LABEL")
                .help("Morning, Midday, Evening, BeforeSleep or Unspecified")
                .takes_value(true)
                .default_value("Morning"),
        )
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .value_name("URL")
                .help("Base URL of the recognition service")
                .takes_value(true),
        )
        .arg(
            Arg::new("details")
                .long("details")
                .help("Print drug information for each identified drug"),
        )
        .get_matches();

    let timing: Timing = required(&matches, "timing")?.parse()?;
    let client = match matches.value_of("api-url") {
        Some(url) => {
            url::Url::parse(url)?;
            MedCheck::new_with_options(url, ClientOptions::default().merge_env()?)
        }
        None => MedCheck::from_env_or_default()?,
    };

    let mut controller = client.workflow();

    let drug_image = required(&matches, "drug-image")?;
    controller.select_drug_image(ImageFile::from_path(drug_image))?;
    controller.identify().await?;
    if let Some(message) = &controller.state().error {
        error!("identification failed");
        eprintln!("{}", message);
        std::process::exit(1);
    }

    println!("Identified drugs:\n{}", render_identified(&controller.state().identified_drugs));
    if matches.is_present("details") {
        let names = controller
            .state()
            .identified_drugs
            .iter()
            .map(|drug| drug.name.clone())
            .collect();
        show_details(&mut controller, names).await;
    }

    controller.confirm_and_proceed()?;
    let prescription = required(&matches, "prescription-image")?;
    controller.select_prescription_image(ImageFile::from_path(prescription))?;
    controller.select_timing(timing)?;
    controller.verify().await?;

    if let Some(message) = &controller.state().error {
        error!("verification failed");
        eprintln!("{}", message);
        std::process::exit(1);
    }
    let prescribed: Vec<String> = match &controller.state().result {
        Some(result) => {
            println!("\n{}", render_result(result));
            result.prescription_drugs.iter().map(|drug| drug.name.clone()).collect()
        }
        None => Vec::new(),
    };
    if matches.is_present("details") {
        show_details(&mut controller, prescribed).await;
    }

    Ok(())
}
