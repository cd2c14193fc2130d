use chrono::NaiveDate;
use clap::Parser;
use colored::*;
use eyre::{Context, Result, bail, eyre};
use log::info;

use flockcalc::{Calculator, LimitingFactor, MarketRates, Outcome, PlanningInput};
use flockplan::cli::{Cli, Command};
use flockplan::config::Config;
use flockplan::domain::{DailyTask, FarmPlan};
use flockplan::engine::TaskEngine;
use flockplan::store::Store;

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();
    Ok(())
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn open_store(config: &Config) -> Result<Store> {
    let path = config.storage.resolve_db_path();
    Store::open(&path).context(format!("Failed to open store at {}", path.display()))
}

fn task_engine(config: &Config) -> Result<TaskEngine> {
    let store = open_store(config)?;
    let catalog = config.template_catalog()?;
    Ok(TaskEngine::new(store, catalog))
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Plan {
            budget,
            space,
            experience,
            days,
            save,
            farmer,
            start_date,
            json,
        } => {
            let input = PlanningInput::new(budget, space, experience, days);
            input.validate()?;

            let calculator = Calculator::new(config.market_rates()?);
            let outcome = calculator.recommend(&input);

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_outcome(&outcome, calculator.rates());
            }

            if save {
                let Outcome::Viable(rec) = &outcome else {
                    bail!("Cannot save a plan from an infeasible recommendation");
                };
                let farmer = farmer.ok_or_else(|| eyre!("--farmer is required with --save"))?;
                let start = start_date.unwrap_or_else(today);
                let plan = FarmPlan::from_recommendation(farmer, rec, days, experience, start);

                open_store(&config)?.insert_plan(&plan)?;
                info!("saved plan {}", plan.id);
                println!("{} Saved plan: {}", "✓".green(), plan.id.cyan());
            }
        }

        Command::Plans { farmer } => {
            let plans = open_store(&config)?.plans_for_owner(&farmer)?;
            if plans.is_empty() {
                println!("No plans found");
            } else {
                for plan in plans {
                    println!(
                        "{}  {} birds, {} days, {}, starts {}",
                        plan.id.cyan(),
                        plan.flock_size,
                        plan.duration_days,
                        plan.experience,
                        plan.start_date
                    );
                }
            }
        }

        Command::Generate { plan } => {
            let mut engine = task_engine(&config)?;
            let farm_plan = engine
                .store()
                .plan(&plan)?
                .ok_or_else(|| eyre!("plan not found: {}", plan))?;

            let tasks = engine.generate(&farm_plan)?;
            println!(
                "{} Generated {} tasks for plan {} ({} to {})",
                "✓".green(),
                tasks.len(),
                farm_plan.id.cyan(),
                farm_plan.start_date,
                farm_plan.end_date()
            );
        }

        Command::Tasks { plan } => {
            let engine = task_engine(&config)?;
            let view = engine.schedule(&plan, today())?;

            println!(
                "{} tasks, {} completed, {} critical, {} upcoming",
                view.total, view.completed, view.critical, view.upcoming
            );
            for day in &view.days {
                println!("{}", format!("Day {} - {}", day.day_number, day.scheduled_date).bold());
                for task in &day.tasks {
                    print_task_line(task);
                }
            }
        }

        Command::Today { plan } => {
            let engine = task_engine(&config)?;
            let tasks = engine.today(&plan, today())?;
            if tasks.is_empty() {
                println!("Nothing scheduled today");
            } else {
                for task in &tasks {
                    print_task_line(task);
                }
            }
        }

        Command::Upcoming { plan, window } => {
            let engine = task_engine(&config)?;
            let window = window.unwrap_or(config.tasks.upcoming_window_days);
            let tasks = engine.upcoming(&plan, today(), window)?;
            if tasks.is_empty() {
                println!("Nothing open in the next {} days", window);
            } else {
                for task in &tasks {
                    println!(
                        "{}  day {}",
                        task.scheduled_date.to_string().dimmed(),
                        task.day_number
                    );
                    print_task_line(task);
                }
            }
        }

        Command::Stats { plan } => {
            let engine = task_engine(&config)?;
            let stats = engine.statistics(&plan, today())?;
            println!("Plan: {}", plan.cyan());
            println!("  Tasks: {} total, {} completed ({}%)", stats.total, stats.completed, stats.completion_percent);
            println!(
                "  Critical: {} total, {} completed ({}%)",
                stats.critical, stats.completed_critical, stats.critical_completion_percent
            );
            println!("  Overdue: {}", stats.overdue);
            println!("  Pending today: {}", stats.today_pending);
        }

        Command::Complete {
            task,
            farmer,
            notes,
            photo,
        } => {
            let engine = task_engine(&config)?;
            let completed = engine.complete(&task, &farmer, notes, photo)?;
            println!(
                "{} Completed: {} (day {})",
                "✓".green(),
                completed.title,
                completed.day_number
            );
        }

        Command::Note { task, farmer, notes } => {
            let engine = task_engine(&config)?;
            let updated = engine.annotate(&task, &farmer, &notes)?;
            println!("{} Noted: {}", "✓".green(), updated.title);
        }

        Command::Photo { task, farmer, photo } => {
            let engine = task_engine(&config)?;
            let updated = engine.attach_photo(&task, &farmer, &photo)?;
            println!("{} Photo attached: {}", "✓".green(), updated.title);
        }

        Command::Delete { plan } => {
            if open_store(&config)?.delete_plan(&plan)? {
                println!("{} Deleted plan and its schedule: {}", "✓".green(), plan);
            } else {
                println!("Plan not found: {}", plan);
            }
        }
    }

    Ok(())
}

fn print_outcome(outcome: &Outcome, rates: &MarketRates) {
    match outcome {
        Outcome::Viable(rec) => {
            println!(
                "{} Recommended flock: {} birds ({} cycle)",
                "✓".green(),
                rec.flock_size.to_string().bold(),
                rec.cycle
            );
            println!(
                "  Capacity: space supports {}, budget supports {} (at {} {}/bird)",
                rec.max_from_space, rec.max_from_budget, rates.currency, rec.cost_per_bird
            );

            let c = &rec.costs;
            println!(
                "  Costs ({}): chicks {} + feed {} + medicine {} + misc {} + mortality buffer {} = {}",
                rates.currency,
                c.chick_cost,
                c.feed_cost,
                c.medicine_cost,
                c.misc_cost,
                c.mortality_buffer,
                c.total.to_string().bold()
            );

            let p = &rec.profitability;
            println!(
                "  Returns: {} surviving, revenue {}, net profit {} (ROI {:.2}%), break-even at {} birds",
                p.surviving_count, p.revenue, p.net_profit, p.roi_percent, p.break_even_flock
            );

            for factor in &rec.limiting_factors {
                match factor {
                    LimitingFactor::Space { current_m2, suggestion } => {
                        println!("  {} Space is the bottleneck ({} m2). {}", "!".yellow(), current_m2, suggestion)
                    }
                    LimitingFactor::Budget { current, suggestion } => {
                        println!(
                            "  {} Budget is the bottleneck ({} {}). {}",
                            "!".yellow(),
                            rates.currency,
                            current,
                            suggestion
                        )
                    }
                }
            }

            println!("  Advice:");
            for line in &rec.advice {
                println!("   - {}", line);
            }
        }
        Outcome::Insufficient(shortfall) => {
            println!("{} Not enough resources for even a starter flock", "✗".red());
            for suggestion in &shortfall.suggestions {
                println!("   - {}", suggestion);
            }
        }
    }
}

fn print_task_line(task: &DailyTask) {
    let mark = if task.completed { "✓".green() } else { "·".dimmed() };
    let flag = if task.critical {
        " [critical]".red().to_string()
    } else {
        String::new()
    };
    println!("  {} {}  {}{}", mark, task.id.yellow(), task.title, flag);
}
