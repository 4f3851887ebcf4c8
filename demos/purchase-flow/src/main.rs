//! Purchase flow demo
//!
//! Drives one scripted purchase through the wizard store against the backend
//! configured via `RIFA_API_URL`. Each transition is narrated; feedback
//! actions are mirrored into an action log and dumped at the end.

use rifa_api::{ApiClient, PaymentMethod, ProofImage};
use rifa_runtime::{ActionLog, Store};
use rifa_shell::AppConfig;
use rifa_wizard::environment::live_environment;
use rifa_wizard::{TicketLimits, WizardAction, WizardReducer, WizardState, WizardStep};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Smallest valid PNG, as the proof-of-payment fixture
const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f,
    0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0a, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "purchase_flow=debug,rifa_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Purchase Flow Demo ===\n");

    let config = AppConfig::from_env();
    println!("Backend: {}", config.api_url);

    let Ok(client) = ApiClient::new(&config.api_url) else {
        eprintln!("Could not build the HTTP client");
        return;
    };

    // Fetch prices; fall back to the configured values when the backend is
    // unreachable, as the landing page does.
    let prices = match client.prices().await {
        Ok(prices) => prices,
        Err(error) => {
            println!("Price fetch failed ({error}), using config fallbacks");
            config.fallback_prices
        },
    };
    println!("Ticket price: {} Bs / {} USD", prices.monto_bs, prices.monto_usd);

    let limits = TicketLimits {
        min: config.ticket_min,
        max: config.ticket_max,
    };
    let store = Store::new(
        WizardState::new(limits, prices),
        WizardReducer::new(),
        live_environment(client),
    );

    // Mirror feedback actions into a log for the final dump.
    let log = Arc::new(ActionLog::new(64));
    let mut observer = store.subscribe();
    let observer_log = Arc::clone(&log);
    tokio::spawn(async move {
        while let Ok(action) = observer.recv().await {
            observer_log.record(format!("{action:?}"));
        }
    });

    let script = [
        WizardAction::Open { prices },
        WizardAction::IncrementQuantity,
        WizardAction::EditSlot {
            index: 0,
            raw: "7".to_string(),
        },
        WizardAction::EditSlot {
            index: 1,
            raw: "1234".to_string(),
        },
        WizardAction::QuantityNext,
    ];

    for action in script {
        println!(">>> {action:?}");
        match store.send(action).await {
            Ok(mut handle) => handle.wait().await,
            Err(error) => {
                eprintln!("Store rejected the action: {error}");
                return;
            },
        }
    }

    let (step, quote, errors) = store
        .state(|s| (s.step, s.quote.clone(), s.slot_errors.clone()))
        .await;
    println!(
        "\nAfter the quantity step: step={step:?}, monto {} Bs / {} USD",
        quote.amount_bs, quote.amount_usd
    );

    if step != WizardStep::Payment {
        println!("Quantity step did not advance (slot errors: {errors:?})");
        dump_log(&log);
        return;
    }

    let rest = [
        WizardAction::SelectPayment(PaymentMethod::PagoMovil),
        WizardAction::PaymentNext,
        WizardAction::EditReference("123456".to_string()),
        WizardAction::AttachProof(ProofImage {
            file_name: "captura.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: TINY_PNG.to_vec(),
        }),
        WizardAction::Submit,
    ];

    for action in rest {
        println!(">>> {action:?}");
        match store.send(action).await {
            Ok(mut handle) => handle.wait().await,
            Err(error) => {
                eprintln!("Store rejected the action: {error}");
                return;
            },
        }
    }

    let (succeeded, error) = store
        .state(|s| (s.submission.succeeded, s.submission.submit_error.clone()))
        .await;
    if succeeded {
        println!("\nPurchase recorded. Closing the success overlay.");
        if let Ok(mut handle) = store.send(WizardAction::CloseSuccess).await {
            handle.wait().await;
        }
    } else {
        println!("\nSubmission did not succeed: {error:?}");
    }

    dump_log(&log);
}

fn dump_log(log: &ActionLog<String>) {
    let entries = log.drain();
    if entries.is_empty() {
        return;
    }
    println!("\nFeedback actions observed:");
    for entry in entries {
        println!("  {entry}");
    }
}
