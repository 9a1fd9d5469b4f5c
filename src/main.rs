use anyhow::Context;
use realty_desk::auth::{
    AuthService, DemoProvider, FileSessionStore, HostedProvider, IdentityProvider, DEMO_EMAIL,
    DEMO_PASSWORD,
};
use realty_desk::config::AppConfig;
use realty_desk::format::{format_date, group_thousands};
use realty_desk::leads::{LeadBook, LeadQuery, StatusFilter};
use realty_desk::listing::{ListingGenerator, ListingRequest};
use realty_desk::models::LeadStatus;
use realty_desk::settings::ProfileSettings;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🏠 Realty Desk");
    info!("==============");

    let provider: Arc<dyn IdentityProvider> = match config.hosted_provider() {
        Some((url, key)) => Arc::new(HostedProvider::new(url, key)?),
        None => Arc::new(DemoProvider::new()),
    };
    info!("Using {} identity provider", provider.provider_name());

    let store = Arc::new(FileSessionStore::new(&config.session_dir));
    let auth = AuthService::new(provider, store);

    let user = match auth.init().await {
        Some(user) => user,
        None => auth
            .login(DEMO_EMAIL, DEMO_PASSWORD)
            .await
            .context("Failed to sign in")?,
    };
    let profile = ProfileSettings::from_user(Some(&user));
    info!("Signed in as {} [{}]", user.email, profile.initials());

    // Lead pipeline
    let book = LeadBook::sample();
    let counts = book.status_counts();
    println!("Leads: {}", counts.total);
    for (status, count) in &counts.by_status {
        println!("   {:<15} {}", status.label(), count);
    }
    println!();

    let active = LeadQuery {
        status: StatusFilter::Only(LeadStatus::Qualified),
        ..Default::default()
    };
    for lead in book.filter(&active) {
        println!("{} <{}> via {}", lead.full_name(), lead.email, lead.source);
        println!("   Updated: {}", format_date(&lead.updated_at));
        if let Some(notes) = &lead.notes {
            println!("   Notes: {}", notes);
        }
    }
    println!();

    // Listing description
    let mut generator = ListingGenerator::new(config.generation_delay());
    let request = ListingRequest {
        property_type: "Single Family Home".to_string(),
        bedrooms: 4,
        bathrooms: 3.0,
        sqft: 2850,
        location: "North York, Toronto".to_string(),
        selected_features: vec![
            "Hardwood Floors".to_string(),
            "Updated Kitchen".to_string(),
        ],
        custom_features: "Finished Basement".to_string(),
    };

    info!("Generating listing description...");
    let listing = generator.generate(request).await?;
    println!(
        "{} bed, {} bath {} ({} sqft) in {}",
        listing.attributes.bedrooms,
        listing.attributes.bathrooms,
        listing.attributes.property_type,
        group_thousands(listing.attributes.sqft),
        listing.attributes.location
    );
    println!("{}", listing.description);
    println!();

    let stats = book.dashboard_stats(generator.history().len());
    println!(
        "Dashboard: {} leads, {} new, {} qualified, {} listings",
        stats.total_leads, stats.new_leads, stats.qualified_leads, stats.total_listings
    );

    // Save generated listings
    let json = serde_json::to_string_pretty(generator.history())?;
    tokio::fs::write("generated_listings.json", json).await?;
    info!("💾 Saved {} listings to generated_listings.json", generator.history().len());

    Ok(())
}
