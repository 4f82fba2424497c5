//! Mixes two feeds and splits the blend across three product streams.
//!
//! The mixer's outlet is the divider's inlet: both devices hold a handle to
//! the same stream, so the divider sees whatever the mixer wrote.
//!
//! Run with `RUST_LOG=twine_flowsheet=debug` to see device events.

use std::error::Error;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use twine_flowsheet::{
    models::process::{BalanceConfig, Device, Divider, MassBalance, Mixer, UnitOperation},
    support::stream::StreamCounter,
};
use uom::si::{f64::MassRate, mass_rate::kilogram_per_second};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let mut counter = StreamCounter::new();
    let feed_a = counter.next_stream();
    let feed_b = counter.next_stream();
    let blend = counter.next_stream();
    let products = [(); 3].map(|()| counter.next_stream());

    feed_a.set_mass_flow(MassRate::new::<kilogram_per_second>(10.0));
    feed_b.set_mass_flow(MassRate::new::<kilogram_per_second>(5.0));

    let mut mixer = Mixer::new(2)?;
    mixer.add_input(feed_a.clone())?;
    mixer.add_input(feed_b.clone())?;
    mixer.add_output(blend.clone())?;

    let mut divider = Divider::new(products.len())?;
    divider.add_input(blend.clone())?;
    for product in &products {
        divider.add_output(product.clone())?;
    }

    let line = [Device::from(mixer), Device::from(divider)];
    let config = BalanceConfig::default();
    for device in &line {
        device.update_outputs()?;
        MassBalance::of(device).check(&config)?;
    }

    for stream in [&feed_a, &feed_b, &blend].into_iter().chain(&products) {
        println!("{stream}");
    }

    Ok(())
}
