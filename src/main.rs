use std::time::Duration;

use anyhow::Result;

use aeris_core::Config;
use aeris_ui::screens::{
    locations_screen, main_screen, map_screen, render_home, render_locations, render_settings,
    Setting,
};
use aeris_ui::services::LocationServiceMessage;
use aeris_ui::{AppServices, Navigator, Screen};

fn main() -> Result<()> {
    aeris_core::init()?;

    let (config, _validation) = Config::load_validated()?;
    let services = AppServices::start(config)?;
    tracing::info!("Aeris started ({:?})", services.open_outcome());

    let language = services.language();
    let session = services.new_session();
    let mut navigator = Navigator::new(services.preferences());
    let now = chrono::Local::now().naive_local();

    let home = services.main_view_model(session.clone())?;
    let screen = render_home(&home, navigator.preferences(), language, now);
    let c = &screen.conditions;
    println!("{}  {}  {}", c.city_name, c.temperature, c.description);
    println!("{}  {}", c.min, c.max);
    println!("{}", c.date_line);
    println!("{}  {}  UV {}  {}", c.humidity, c.wind, c.uv, c.precipitation);
    for item in screen.hourly.iter().filter(|h| h.is_current_hour) {
        println!("now {}  {}", item.hour, item.temperature);
    }
    for day in &screen.daily {
        println!("{:<10} {:<10} {}", day.day, day.secondary_day, day.temperatures);
    }
    tracing::debug!("{} cities to pick from", main_screen::city_picker(&home).len());

    let prefs = navigator.navigate(Screen::Locations);
    let locations = services.locations_view_model(session.clone())?;
    if let Err(e) = locations.hide_city(session.selected_city()) {
        println!("{}", e.user_message(language));
    }
    for item in render_locations(&locations, prefs, language, now).items {
        let detail = item.min_max.unwrap_or(item.weekday);
        println!("{:<16} {:>5}  {}  {}", item.name, item.temperature, item.description, detail);
    }
    tracing::debug!(
        "{} hidden cities",
        locations_screen::hidden_city_picker(&locations).len()
    );

    services.request_current_location();
    if let Some(LocationServiceMessage::Done(Err(e))) =
        services.recv_location(Duration::from_secs(2))
    {
        println!("{}", e.user_message(language));
    }

    if let Some(city) = home.selected_city() {
        navigator.navigate(Screen::Map);
        match map_screen::present_map(&city) {
            Ok(map) => println!("{}: {}", map.title, map.url),
            Err(e) => println!("{}", map_screen::map_error_message(&e, language)),
        }
    }

    navigator.navigate(Screen::Settings);
    navigator.apply(Setting::TemperatureUnit.toggle(navigator.preferences()));
    for row in render_settings(navigator.preferences(), language) {
        println!("[{}] {}", if row.enabled { "x" } else { " " }, row.label);
    }

    drop(locations);
    drop(home);
    services.shutdown();
    Ok(())
}
