use std::env;
use std::io::{self, Write};

use bevy_utils::tracing::warn;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use shanmei_creator::character::{available_hooks, FLAVOR_PROMPTS};
use shanmei_creator::config::{parse_args, CreatorConfig};
use shanmei_creator::core::world::{EditIntent, Wizard, WizardSnapshot};
use shanmei_creator::data::Catalogs;
use shanmei_creator::persistence::{MemorySlotStore, SlotDb, SlotStore};
use shanmei_creator::rules::RestrictionPolicy;
use shanmei_creator::ui::catalog_view::{
    render_class_detail, render_class_list, render_faction_detail, render_faction_list,
    render_race_detail, render_race_list,
};
use shanmei_creator::Slot;

const COMMANDS: &str = "Commands: show | export | json | slot <A|B|C> | slots | name <text> | concept <text> | notes <text> | note <text> | races | race [id] | factions | faction [id] | classes | class [id] | trait <add|rm|clear> [text] | gear <kit|none> | hooks | hook <n> | prompts | prompt <n> | check | policy <warn|enforce> | help | quit";

fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shanmei_creator=info".into()),
        )
        .with(fmt::layer())
        .init();

    let config = match parse_args(&env::args().collect::<Vec<_>>()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Usage: shanmei-creator [--db <path>] [--data <dir>] [--slot <A|B|C>] [--enforce] [--memory]");
            std::process::exit(2);
        }
    };

    println!("Shanmei Character Creator");
    let catalogs = Catalogs::load_or_bundled(config.data_dir.as_deref());
    let store = open_store(&config);
    let mut wizard = Wizard::open(catalogs, config.policy, store, config.slot.as_str());

    print!("{}", wizard.summary());
    println!("{}", COMMANDS);
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (cmd, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (trimmed.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "quit" | "exit" => break,
            "help" => println!("{}", COMMANDS),
            "show" => print!("{}", wizard.summary()),
            "export" => println!("{}", wizard.export_text()),
            "json" => match wizard.export_json() {
                Ok(json) => println!("{}", json),
                Err(err) => println!("Failed to serialize character: {}", err),
            },
            "slot" => match rest.parse::<Slot>() {
                Ok(slot) => {
                    let snapshot = wizard.switch_slot(slot.as_str());
                    report(&snapshot);
                    print!("{}", wizard.summary());
                }
                Err(message) => println!("{}", message),
            },
            "slots" => {
                let saved = wizard.occupied_slots();
                let current = wizard.record().slot.clone();
                for slot in Slot::ALL {
                    let state = if saved.iter().any(|name| name == slot.as_str()) {
                        "saved"
                    } else {
                        "empty"
                    };
                    let marker = if slot.as_str() == current { "*" } else { " " };
                    println!("{} {}: {}", marker, slot.as_str(), state);
                }
            }
            "name" => edit(&mut wizard, EditIntent::SetName(rest.to_string())),
            "concept" => edit(&mut wizard, EditIntent::SetConcept(rest.to_string())),
            "notes" => edit(&mut wizard, EditIntent::SetNotes(rest.to_string())),
            "note" => edit(&mut wizard, EditIntent::AppendNote(rest.to_string())),
            "races" => print!("{}", render_race_list(wizard.catalogs(), &wizard.record().race_id)),
            "race" => {
                if rest.is_empty() {
                    match wizard.catalogs().race(&wizard.record().race_id) {
                        Some(race) => print!("{}", render_race_detail(race)),
                        None => println!("Race {} is not in the catalog.", wizard.record().race_id),
                    }
                } else {
                    edit(&mut wizard, EditIntent::SetRace(rest.to_string()));
                }
            }
            "factions" => print!(
                "{}",
                render_faction_list(wizard.catalogs(), &wizard.record().faction_id)
            ),
            "faction" => {
                if rest.is_empty() {
                    match wizard.catalogs().faction(&wizard.record().faction_id) {
                        Some(faction) => print!("{}", render_faction_detail(faction)),
                        None => println!(
                            "Faction {} is not in the catalog.",
                            wizard.record().faction_id
                        ),
                    }
                } else {
                    edit(&mut wizard, EditIntent::SetFaction(rest.to_string()));
                }
            }
            "classes" => print!(
                "{}",
                render_class_list(
                    wizard.catalogs(),
                    &wizard.record().class_id,
                    &wizard.record().faction_id
                )
            ),
            "class" => {
                if rest.is_empty() {
                    match wizard.catalogs().class(&wizard.record().class_id) {
                        Some(class) => print!("{}", render_class_detail(class, wizard.catalogs())),
                        None => {
                            println!("Class {} is not in the catalog.", wizard.record().class_id)
                        }
                    }
                } else {
                    edit(&mut wizard, EditIntent::PickClass(rest.to_string()));
                }
            }
            "trait" => {
                let (sub, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(sub, value)| (sub, value.trim()))
                    .unwrap_or((rest, ""));
                match sub {
                    "add" => edit(&mut wizard, EditIntent::AddTrait(value.to_string())),
                    "rm" => edit(&mut wizard, EditIntent::RemoveTrait(value.to_string())),
                    "clear" => edit(&mut wizard, EditIntent::ClearTraits),
                    _ => println!("Usage: trait <add|rm|clear> [text]"),
                }
            }
            "gear" => {
                let kit = match rest {
                    "" | "none" => None,
                    kit => Some(kit.to_string()),
                };
                edit(&mut wizard, EditIntent::SetGearKit(kit));
            }
            "hooks" => {
                let hooks = available_hooks(wizard.record(), wizard.catalogs());
                if hooks.is_empty() {
                    println!("No hooks for the current faction and class.");
                }
                for (idx, hook) in hooks.iter().enumerate() {
                    println!("  {}. {}", idx + 1, hook);
                }
            }
            "hook" => {
                let hook = pick_numbered(
                    rest,
                    &available_hooks(wizard.record(), wizard.catalogs()),
                );
                match hook {
                    Some(hook) => edit(&mut wizard, EditIntent::AppendNote(hook)),
                    None => println!("Usage: hook <n> (see 'hooks')"),
                }
            }
            "prompts" => {
                for (idx, prompt) in FLAVOR_PROMPTS.iter().enumerate() {
                    println!("  {}. {}", idx + 1, prompt);
                }
            }
            "prompt" => match pick_numbered(rest, &FLAVOR_PROMPTS) {
                Some(prompt) => edit(&mut wizard, EditIntent::AppendNote(prompt)),
                None => println!("Usage: prompt <n> (see 'prompts')"),
            },
            "check" => print_check(&wizard),
            "policy" => match rest.parse::<RestrictionPolicy>() {
                Ok(policy) => {
                    wizard.set_policy(policy);
                    println!("Restriction policy: {}", policy.as_str());
                }
                Err(message) => println!("{}", message),
            },
            _ => println!("Unknown command. Type 'help' for the list."),
        }
    }
}

fn open_store(config: &CreatorConfig) -> Box<dyn SlotStore> {
    if config.in_memory {
        return Box::new(MemorySlotStore::new());
    }
    match SlotDb::open(&config.db_path) {
        Ok(db) => Box::new(db),
        Err(err) => {
            warn!(
                "Failed to open slot DB at {}: {}; slots will not be saved",
                config.db_path.display(),
                err
            );
            Box::new(MemorySlotStore::new())
        }
    }
}

fn edit(wizard: &mut Wizard, intent: EditIntent) {
    let snapshot = wizard.apply_one(intent);
    report(&snapshot);
}

fn report(snapshot: &WizardSnapshot) {
    for line in &snapshot.log {
        println!("{}", line);
    }
    if !snapshot.persisted {
        println!("(not saved; see log)");
    }
}

fn pick_numbered(raw: &str, options: &[&str]) -> Option<String> {
    let index = raw.parse::<usize>().ok()?;
    options.get(index.checked_sub(1)?).map(|line| line.to_string())
}

fn print_check(wizard: &Wizard) {
    let status = wizard.compatibility();
    let record = wizard.record();
    let catalogs = wizard.catalogs();
    let class = catalogs
        .class(&record.class_id)
        .map(|class| class.name.as_str())
        .unwrap_or(record.class_id.as_str());
    let faction = catalogs
        .faction(&record.faction_id)
        .map(|faction| faction.display_name())
        .unwrap_or(record.faction_id.as_str());
    println!(
        "{} under {}: {} (policy: {})",
        class,
        faction,
        if status.allowed { "allowed" } else { "mismatch" },
        wizard.policy().as_str()
    );
}
