use clap::{Parser, Subcommand};
use studentos_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod context;

#[derive(Parser)]
#[command(name = "studentos", version, about = "StudentOS CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Courses and attendance
    Course {
        #[command(subcommand)]
        action: commands::course::CourseAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Habits and streaks
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Campus and personal events
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Competitive programming contests
    Contest {
        #[command(subcommand)]
        action: commands::contest::ContestAction,
    },
    /// Weekly timetable
    Timetable {
        #[command(subcommand)]
        action: commands::timetable::TimetableAction,
    },
    /// Derived metrics
    Dashboard {
        #[command(subcommand)]
        action: commands::dashboard::DashboardAction,
    },
    /// Notification center
    Notify {
        #[command(subcommand)]
        action: commands::notify::NotifyAction,
    },
    /// User settings stored with the data
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Time-based reminders
    Remind {
        #[command(subcommand)]
        action: commands::remind::RemindAction,
    },
    /// Stored data maintenance
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
}

/// `STUDENTOS_LOG` wins over `logging.level`. Output goes to stderr.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_env("STUDENTOS_LOG")
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_logging(&config);

    let result = match cli.command {
        Commands::Course { action } => commands::course::run(action, &config),
        Commands::Task { action } => commands::task::run(action, &config),
        Commands::Habit { action } => commands::habit::run(action, &config),
        Commands::Event { action } => commands::event::run(action, &config),
        Commands::Contest { action } => commands::contest::run(action, &config),
        Commands::Timetable { action } => commands::timetable::run(action, &config),
        Commands::Dashboard { action } => commands::dashboard::run(action, &config),
        Commands::Notify { action } => commands::notify::run(action, &config),
        Commands::Settings { action } => commands::settings::run(action, &config),
        Commands::Config { action } => commands::config::run(action),
        Commands::Remind { action } => commands::remind::run(action, &config),
        Commands::Data { action } => commands::data::run(action, &config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
