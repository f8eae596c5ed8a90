//! Command-line reservation client.
//!
//! Fills the reservation form from arguments, prints the confirmation
//! summary and, once confirmed, submits it to a running server.

use clap::{Parser, ValueEnum};
use rust_pickup_api::models::{FieldName, ServiceType};
use rust_pickup_api::reservation_form::{FormError, HttpReservationClient, ReservationForm};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ServiceArg {
    Pickup,
    Dropoff,
    Both,
    Tour,
}

impl From<ServiceArg> for ServiceType {
    fn from(arg: ServiceArg) -> Self {
        match arg {
            ServiceArg::Pickup => ServiceType::Pickup,
            ServiceArg::Dropoff => ServiceType::Dropoff,
            ServiceArg::Both => ServiceType::PickupAndDropoff,
            ServiceArg::Tour => ServiceType::CustomTour,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "reserve", about = "Submit an airport pickup/drop-off reservation")]
struct Args {
    /// Base URL of the reservation server
    #[arg(long, env = "RESERVATION_SERVER_URL", default_value = "http://localhost:3000")]
    server: String,

    #[arg(long, value_enum, default_value = "pickup")]
    service: ServiceArg,

    #[arg(long, default_value = "")]
    name: String,

    /// KakaoTalk ID
    #[arg(long)]
    contact: String,

    /// Pickup date-time on your local clock, e.g. 2025-03-01T10:00
    #[arg(long, default_value = "")]
    pickup_date: String,

    /// Drop-off date-time on your local clock
    #[arg(long, default_value = "")]
    dropoff_date: String,

    #[arg(long, default_value = "")]
    flight_number: String,

    #[arg(long, default_value = "")]
    meeting_address: String,

    /// Additional requests, or the desired tour for custom tours
    #[arg(long, default_value = "")]
    note: String,

    /// Skip the interactive confirmation
    #[arg(long, short = 'y')]
    yes: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args = Args::parse();
    let mut form = ReservationForm::new();

    form.select_service(args.service.into())?;
    for (field, value) in [
        (FieldName::Name, &args.name),
        (FieldName::Contact, &args.contact),
        (FieldName::PickupDate, &args.pickup_date),
        (FieldName::DropoffDate, &args.dropoff_date),
        (FieldName::FlightNumber, &args.flight_number),
        (FieldName::MeetingAddress, &args.meeting_address),
        (FieldName::Note, &args.note),
    ] {
        form.update_field(field, value)?;
    }

    if let Err(e) = form.request_review() {
        if let FormError::MissingRequiredFields(fields) = &e {
            for field in fields {
                eprintln!("Missing required field: {} ({})", field.label(), field.wire_name());
            }
        } else {
            eprintln!("{}", e);
        }
        return Ok(ExitCode::FAILURE);
    }

    println!("예약 확인");
    for line in form.review_summary()? {
        println!("  {}: {}", line.label, line.value);
    }

    if !args.yes && !prompt_confirmation()? {
        form.cancel_review()?;
        println!("취소되었습니다.");
        return Ok(ExitCode::SUCCESS);
    }

    let client = HttpReservationClient::new(&args.server)?;
    match form.confirm(&client).await {
        Ok(()) => {
            if let Some(message) = form.success_message() {
                println!("{}", message);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => {
            if let Some(notice) = form.notice() {
                eprintln!("{}", notice);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn prompt_confirmation() -> io::Result<bool> {
    print!("확인하시겠습니까? [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
