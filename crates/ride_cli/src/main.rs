use std::process::exit;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ride_core::catalog::{suggested_locations, VehicleClass, VEHICLE_CATALOG};
use ride_core::clock::SimulationClock;
use ride_core::config::{build_ride_world, RideParams};
use ride_core::identity::{IdentitySession, InMemoryStore};
use ride_core::intents;
use ride_core::location::{
    detect_live_location, FixedPositioningProvider, PositioningProviderResource,
};
use ride_core::runner::{ride_schedule, run_next_event_with_hook, run_until_empty};
use ride_core::session::{RideSession, RideStatus};
use ride_core::telemetry::RideTelemetry;

#[derive(Parser)]
#[command(
    name = "ride_cli",
    about = "Scripted booking sessions against the ride simulator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect a pickup, book a ride and watch the captain approach
    Book {
        /// Vehicle class: bike, auto or cab
        #[arg(long, default_value = "bike")]
        vehicle: String,
        /// Drop location: index into the suggestion list (0-4)
        #[arg(long, default_value_t = 4)]
        drop: usize,
        /// Cancel the ride at this simulation time (ms)
        #[arg(long)]
        cancel_at_ms: Option<u64>,
        /// Phone number for the scripted login
        #[arg(long, default_value = "9876543210")]
        phone: String,
        /// Seed for deterministic captain fabrication
        #[arg(long)]
        seed: Option<u64>,
        /// Pretend the device has no positioning capability
        #[arg(long)]
        no_gps: bool,
    },
    /// Print the vehicle catalog and suggestion landmarks
    Catalog,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        Commands::Book {
            vehicle,
            drop,
            cancel_at_ms,
            phone,
            seed,
            no_gps,
        } => book(&vehicle, drop, cancel_at_ms, &phone, seed, no_gps),
        Commands::Catalog => catalog(),
    }
}

fn book(
    vehicle: &str,
    drop: usize,
    cancel_at_ms: Option<u64>,
    phone: &str,
    seed: Option<u64>,
    no_gps: bool,
) {
    let class: VehicleClass = match vehicle.parse() {
        Ok(class) => class,
        Err(err) => {
            eprintln!("{err}");
            exit(2);
        }
    };

    let mut identity = IdentitySession::new(InMemoryStore::default());
    let user = match identity.login(phone, &mut rand::thread_rng()) {
        Ok(user) => user,
        Err(err) => {
            eprintln!("login failed: {err}");
            exit(1);
        }
    };
    identity.grant_permissions();
    println!("logged in as {} (+91 {})", user.id, user.phone_number);
    let suggestions = suggested_locations();
    let Some(drop_coord) = suggestions.get(drop).cloned() else {
        eprintln!("--drop must be 0..{}", suggestions.len() - 1);
        exit(2);
    };

    let mut params = RideParams::default();
    if let Some(seed) = seed {
        params = params.with_seed(seed);
    }
    let mut world = build_ride_world(params);
    if !no_gps {
        // Scripted "device": a fix near Hitech City after 1.2 s.
        world.insert_resource(PositioningProviderResource(Box::new(
            FixedPositioningProvider {
                latitude: 17.4474,
                longitude: 78.3814,
                latency_ms: 1_200,
            },
        )));
    }
    let mut schedule = ride_schedule();

    detect_live_location(&mut world);
    run_until_empty(&mut world, &mut schedule, 16);
    {
        let session = world.resource::<RideSession>();
        let pickup = session.pickup.as_ref().expect("detection always resolves");
        println!(
            "[{:>6} ms] pickup: {} ({:.4}, {:.4}) via {:?}",
            world.resource::<SimulationClock>().now(),
            pickup.label,
            pickup.latitude,
            pickup.longitude,
            session.last_fix_source.expect("fix source recorded"),
        );
    }

    intents::set_drop(&mut world, drop_coord.clone());
    println!("        drop: {}", drop_coord.label);
    if let Err(err) = intents::start_search(&mut world, class) {
        eprintln!("cannot start search: {err}");
        exit(1);
    }
    println!(
        "[{:>6} ms] searching for a {class} captain...",
        world.resource::<SimulationClock>().now()
    );

    let mut cancelled = false;
    loop {
        let Some(next) = world.resource::<SimulationClock>().next_event_time() else {
            break;
        };
        if let Some(at) = cancel_at_ms {
            if !cancelled && next >= at {
                intents::cancel(&mut world);
                cancelled = true;
                println!("[{at:>6} ms] ride cancelled by user");
                continue;
            }
        }
        run_next_event_with_hook(&mut world, &mut schedule, |world, event| {
            let session = world.resource::<RideSession>();
            match (session.status, session.captain.as_ref()) {
                (RideStatus::Assigned, Some(captain)) => println!(
                    "[{:>6} ms] {:?} -> {} ({}) at ({:.4}, {:.4}), otp {}",
                    event.timestamp,
                    event.kind,
                    captain.name,
                    captain.vehicle_label,
                    captain.position.latitude,
                    captain.position.longitude,
                    captain.otp,
                ),
                _ => println!("[{:>6} ms] {:?} (status {:?})", event.timestamp, event.kind, session.status),
            }
        });
    }

    let session = world.resource::<RideSession>();
    let telemetry = world.resource::<RideTelemetry>();
    println!("final status: {:?}", session.status);
    println!(
        "telemetry: searches={} assigned={} cancelled={} stale_discarded={} fixes(live/fallback)={}/{}",
        telemetry.searches_started,
        telemetry.captains_assigned,
        telemetry.rides_cancelled,
        telemetry.stale_events_discarded,
        telemetry.location_fixes_live,
        telemetry.location_fixes_fallback,
    );
    if let Some(record) = telemetry.assignments.first() {
        println!(
            "captain assigned after {} ms of searching",
            record.time_to_assign()
        );
    }
}

fn catalog() {
    println!("vehicles:");
    for option in VEHICLE_CATALOG {
        println!(
            "  {:<5} ₹{:<4} {:>2} min away  {}",
            option.display_name, option.fare_rupees, option.eta_minutes, option.description
        );
    }
    println!("suggestions:");
    for (i, place) in suggested_locations().iter().enumerate() {
        println!(
            "  [{i}] {} ({:.4}, {:.4})",
            place.label, place.latitude, place.longitude
        );
    }
}
