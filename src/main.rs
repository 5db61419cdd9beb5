//! Skill Atlas - Entry Point
//!
//! Loads a people fixture, builds the aggregation engine, and provides a
//! small interactive loop for exploring selections, visibility toggles, and
//! drill-down navigation from the terminal.

use clap::Parser;
use skill_atlas::core::error::Result;
use skill_atlas::core::types::SkillKey;
use skill_atlas::engine::SkillAtlas;
use skill_atlas::fixture::load_people;
use skill_atlas::view::ViewState;

use std::io::{self, Write};
use std::path::PathBuf;

/// Aggregate a skill roster and explore it interactively
#[derive(Parser, Debug)]
#[command(name = "skill-atlas")]
#[command(about = "Aggregate a skill roster and explore it interactively")]
struct Args {
    /// Path to the people fixture (JSON object with a "people" array)
    #[arg(long, default_value = "people.json")]
    people: PathBuf,
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("skill_atlas=debug")
        .init();

    let args = Args::parse();

    let mut atlas = SkillAtlas::new();
    atlas.set_people(load_people(&args.people));

    println!("\n=== SKILL ATLAS ===");
    println!("Deterministic skill aggregation over a roster of people");
    println!();
    println!("Commands:");
    println!("  status / s           - Show roster and view status");
    println!("  skills               - Show the skill-centric table");
    println!("  people               - Show the person-centric table");
    println!("  select <id>          - Toggle a person in/out of the selection");
    println!("  all / none           - Select everyone / no one");
    println!("  hide <id>            - Toggle a person's visibility");
    println!("  hide-skill <d> <s>   - Toggle a skill's visibility");
    println!("  drill <domain>       - Drill down into a domain");
    println!("  back                 - Go back one view");
    println!("  overview             - Reset to the overview");
    println!("  quit / q             - Exit");
    println!();

    loop {
        display_status(&atlas);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }

        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or_default();
        match command {
            "status" | "s" => {} // status is printed every turn
            "skills" => display_skill_table(&atlas),
            "people" => display_person_table(&atlas),
            "select" => match parts.next() {
                Some(id) => atlas.toggle_person_selected(id),
                None => println!("Usage: select <id>"),
            },
            "all" => atlas.select_all_people(),
            "none" => atlas.clear_all_people(),
            "hide" => match parts.next() {
                Some(id) => atlas.toggle_person_visibility(id),
                None => println!("Usage: hide <id>"),
            },
            "hide-skill" => match (parts.next(), parts.next()) {
                (Some(domain), Some(skill)) => {
                    atlas.toggle_skill_visibility(&SkillKey::new(domain, skill));
                }
                _ => println!("Usage: hide-skill <domain> <skill>"),
            },
            "drill" => match parts.next() {
                Some(domain) => {
                    if !atlas.drill_down_to_domain(domain) {
                        println!("Unknown domain: {domain}");
                    }
                }
                None => println!("Usage: drill <domain>"),
            },
            "back" => atlas.go_back(),
            "overview" => atlas.reset_to_overview(),
            other => println!("Unknown command: {other}"),
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn display_status(atlas: &SkillAtlas) {
    let view = match atlas.view() {
        ViewState::Overview => "overview".to_string(),
        ViewState::Domain(name) => format!("domain {name}"),
    };
    println!(
        "[{} people | {} selected | {} visible | {} skills | view: {}]",
        atlas.people().len(),
        atlas.selected_person_ids().len(),
        atlas.visible_count(),
        atlas.metadata().len(),
        view
    );
}

fn display_skill_table(atlas: &SkillAtlas) {
    let rows = atlas.skill_table_rows();
    if rows.is_empty() {
        println!("  (no skills to show)");
        return;
    }
    println!(
        "  {:<30} {:>10} {:>10} {:>12}",
        "skill", "total", "avg", "contributors"
    );
    for row in rows {
        let marker = if row.is_visible { ' ' } else { '*' };
        println!(
            " {}{:<30} {:>10.1} {:>10.1} {:>12}",
            marker,
            row.skill_key.as_str(),
            row.total_usage,
            row.avg_usage,
            row.contributor_count
        );
        for contributor in &row.contributors {
            println!(
                "    {:<27} {:>10.1} {:>9.1}%",
                contributor.person_name, contributor.usage, contributor.percentage
            );
        }
    }
}

fn display_person_table(atlas: &SkillAtlas) {
    let rows = atlas.person_table_rows();
    if rows.is_empty() {
        println!("  (no people to show)");
        return;
    }
    println!(
        "  {:<20} {:>10} {:>8} {:>7}",
        "person", "total", "share", "skills"
    );
    for row in rows {
        let marker = if row.is_visible { ' ' } else { '*' };
        println!(
            " {}{:<20} {:>10.1} {:>7.1}% {:>7}",
            marker, row.person_name, row.total_usage, row.chart_percentage, row.skill_count
        );
        for (domain, percent) in &row.domain_breakdown {
            println!("    {domain}: {percent}%");
        }
    }
}
