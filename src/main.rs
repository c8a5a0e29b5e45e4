use clap::Parser;

use nutritrack::cli::{Cli, Command};
use nutritrack::config::Config;
use nutritrack::error::{NutriError, Result};
use nutritrack::interface::{
    available_actions, display_goal_suggestion, display_plan, display_saved_plan, prompt_action,
    prompt_measurements, prompt_option, prompt_profile, prompt_slot, prompt_yes_no, slot_refs,
    Action, PlanView,
};
use nutritrack::models::UserProfile;
use nutritrack::planner::suggest_goal;
use nutritrack::service::{HttpPlanService, PlanService};
use nutritrack::state::{PlanStateController, PlanStore};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Plan => cmd_plan(&config),
        Command::SuggestGoal { height, weight } => cmd_suggest_goal(height, weight),
        Command::Load => cmd_load(&config),
        Command::Clear => cmd_clear(&config),
    }
}

/// Interactive session: profile form, plan screen, and the action menu.
fn cmd_plan(config: &Config) -> Result<()> {
    let service = HttpPlanService::new(&config.backend_url, config.timeout)?;
    let mut controller = PlanStateController::new(service, PlanStore::new(&config.storage_path));

    println!("Enter your profile.");
    let mut form = prompt_profile_until_valid()?;
    generate(&mut controller, &form);

    loop {
        let view = PlanView::from_controller(&controller);
        if let Some(view) = &view {
            display_plan(view);
        }

        match prompt_action(&available_actions(view.as_ref()))? {
            Action::Generate => generate(&mut controller, &form),
            Action::SelectOption => {
                let Some(view) = &view else { continue };
                let slots: Vec<_> = view.selectable_slots().collect();
                let slot = prompt_slot("Which meal?", &slots)?;
                let option = prompt_option(slot)?;
                match controller.select(slot.index, option) {
                    Ok(total) => println!("Total Calories: {:.0} kcal", total),
                    Err(e) => report(&e),
                }
            }
            Action::ToggleLock => {
                let Some(view) = &view else { continue };
                let slot = prompt_slot("Lock or unlock which meal?", &slot_refs(view))?;
                match controller.toggle_lock(slot.index) {
                    Ok(true) => println!("{} will be kept on regenerate.", slot.name),
                    Ok(false) => println!("{} is unlocked.", slot.name),
                    Err(e) => report(&e),
                }
            }
            Action::Regenerate => {
                println!("Generating...");
                if let Err(e) = controller.regenerate() {
                    println!("Could not regenerate.");
                    report(&e);
                }
            }
            Action::Undo => {
                if !controller.undo() {
                    println!("Nothing to undo.");
                }
            }
            Action::Save => match controller.save() {
                Ok(_) => println!("Plan saved locally."),
                Err(e) => report(&e),
            },
            Action::Load => match controller.load(&form) {
                Ok(saved) => display_saved_plan(&saved),
                Err(e) => report(&e),
            },
            Action::EditProfile => match prompt_profile(Some(&form)) {
                Ok(edited) => {
                    form = edited;
                    println!("Profile updated. Choose 'Generate plan' to use it.");
                }
                Err(e) if !e.is_fatal() => {
                    report(&e);
                    println!("Profile unchanged.");
                }
                Err(e) => return Err(e),
            },
            Action::SuggestGoal => match suggest_goal(Some(form.height), Some(form.weight)) {
                Ok(suggestion) => {
                    display_goal_suggestion(&suggestion);
                    form.goal = suggestion.goal;
                }
                Err(e) => report(&e),
            },
            Action::Quit => break,
        }
    }

    Ok(())
}

/// Ask for a profile until one passes validation.
fn prompt_profile_until_valid() -> Result<UserProfile> {
    loop {
        match prompt_profile(None) {
            Ok(profile) => return Ok(profile),
            Err(e) if !e.is_fatal() => report(&e),
            Err(e) => return Err(e),
        }
    }
}

fn generate<S: PlanService>(controller: &mut PlanStateController<S>, form: &UserProfile) {
    println!("Generating your diet plan...");
    if let Err(e) = controller.generate(form.clone()) {
        report(&e);
    }
}

/// Print a recoverable error for the user.
fn report(e: &NutriError) {
    match e {
        NutriError::Transport { .. } => {
            println!("Could not connect to backend.");
            println!("{}", e);
        }
        _ => println!("{}", e),
    }
}

fn cmd_suggest_goal(height: Option<f64>, weight: Option<f64>) -> Result<()> {
    let (height, weight) = if height.is_none() && weight.is_none() {
        prompt_measurements()?
    } else {
        (height, weight)
    };

    let suggestion = suggest_goal(height, weight)?;
    display_goal_suggestion(&suggestion);
    Ok(())
}

fn cmd_load(config: &Config) -> Result<()> {
    let store = PlanStore::new(&config.storage_path);
    if store.load()?.is_none() {
        println!("{}", NutriError::NothingSaved);
        return Ok(());
    }

    println!("Enter the profile the plan was made for.");
    let profile = prompt_profile_until_valid()?;
    match store.load_for(&profile) {
        Ok(saved) => display_saved_plan(&saved),
        Err(e @ NutriError::SignatureMismatch) => println!("{}", e),
        Err(e) => return Err(e),
    }
    Ok(())
}

fn cmd_clear(config: &Config) -> Result<()> {
    let store = PlanStore::new(&config.storage_path);
    if !prompt_yes_no("Delete the saved plan?", false)? {
        return Ok(());
    }
    if store.clear()? {
        println!("Saved plan deleted.");
    } else {
        println!("{}", NutriError::NothingSaved);
    }
    Ok(())
}
