//! llm-inside-out CLI.
//!
//! ```bash
//! llm-inside-out lessons                 # List the course
//! llm-inside-out predict --seed 7        # Play the next-word game
//! llm-inside-out context                 # Watch tokens fall off the belt
//! llm-inside-out roleplay --role pirate  # Chat under a system prompt
//! llm-inside-out explain attention       # Read about a topic
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use llm_inside_out::chat::{GeminiClient, PRESETS, RolePlay};
use llm_inside_out::context_window::ContextWindow;
use llm_inside_out::educational::{
    ExplanationLevel, InteractiveTutorial, attention_heatmap_ascii, attention_spotlight, box_text,
    context_badge, context_window_belt, insight_box, lesson_header, probability_bars,
    progress_bar, token_sequence_box, word_map_ascii,
};
use llm_inside_out::lessons::embeddings::{
    DOCUMENTS, WORD_MAP, analogy, cosine_similarity, nearest_neighbors, similarity_percent,
};
use llm_inside_out::lessons::finetuning::{ExampleCategory, InstructionSchool};
use llm_inside_out::lessons::hallucination::{REMINDER, SCENARIOS, find_scenario};
use llm_inside_out::lessons::pretraining::LibraryMachine;
use llm_inside_out::lessons::{LessonId, attention};
use llm_inside_out::prediction::{GenerationSession, Sampler, TransitionTable};
use llm_inside_out::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "llm-inside-out")]
#[command(about = "Learn how large language models work, one lesson at a time")]
#[command(version)]
struct Args {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed for reproducible predictions
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all lessons
    Lessons,

    /// Build a sentence by picking predicted next words
    Predict {
        /// Skip the simulated thinking delay
        #[arg(long)]
        no_delay: bool,
    },

    /// Push words into a fixed-size context window
    Context,

    /// Chat with the model under a role instruction
    Roleplay {
        /// Persona: assistant, pirate, yoda, baby
        #[arg(short, long, default_value = "assistant")]
        role: String,
    },

    /// Show which earlier words a word attends to
    Attention {
        /// Index of the focused word (0-9)
        #[arg(short, long)]
        focus: Option<usize>,

        /// Print the full attention heatmap
        #[arg(long)]
        heatmap: bool,
    },

    /// Explore the word map and vector math
    Embeddings {
        /// Show nearest neighbours of this word
        #[arg(short, long)]
        word: Option<String>,
    },

    /// Train the model on instruction examples
    Finetune {
        /// Only show one category: basic, medical, finance
        #[arg(long)]
        category: Option<String>,
    },

    /// See the model invent facts
    Hallucination {
        /// Scenario id or index
        scenario: Option<String>,
    },

    /// Watch the library machine read
    Pretrain {
        /// Number of items to absorb
        #[arg(long, default_value = "40")]
        ticks: u32,
    },

    /// Explain a topic
    Explain {
        /// Topic: prediction, temperature, embeddings, attention, ...
        topic: String,

        /// short, medium, detailed, why
        #[arg(short, long, default_value = "medium")]
        level: String,
    },

    /// Interactive guided tutorial
    Tutorial {
        /// Show a single chapter
        #[arg(long)]
        chapter: Option<usize>,

        /// List chapters and exit
        #[arg(long)]
        list: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "llm_inside_out=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AppConfig::default(),
    };

    match args.command {
        Command::Lessons => list_lessons(),
        Command::Predict { no_delay } => run_predict(&config, args.seed, !no_delay).await?,
        Command::Context => run_context(&config)?,
        Command::Roleplay { role } => run_roleplay(&config, &role).await?,
        Command::Attention { focus, heatmap } => run_attention(focus, heatmap)?,
        Command::Embeddings { word } => run_embeddings(word.as_deref())?,
        Command::Finetune { category } => run_finetune(category.as_deref())?,
        Command::Hallucination { scenario } => run_hallucination(scenario.as_deref())?,
        Command::Pretrain { ticks } => run_pretrain(ticks),
        Command::Explain { topic, level } => {
            InteractiveTutorial::new().show_topic(&topic, ExplanationLevel::from_name(&level))
        }
        Command::Tutorial { chapter, list } => {
            let mut tutorial = InteractiveTutorial::new();
            if list {
                tutorial.list_chapters();
            } else if let Some(idx) = chapter {
                tutorial.run_chapter(idx);
            } else {
                tutorial.run();
            }
        }
    }

    Ok(())
}

/// Print a prompt and read one trimmed line. `None` on end of input.
fn prompt(text: &str) -> io::Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn header(lesson: LessonId) {
    let title = lesson
        .label()
        .split_once(". ")
        .map_or(lesson.label(), |(_, title)| title);
    println!("{}", lesson_header(lesson.index(), title));
    println!("  {}\n", lesson.subtitle());
}

fn list_lessons() {
    println!("\n📚 Lessons:");
    for lesson in LessonId::ALL {
        println!("  {:<20} {:<14} {}", lesson.label(), lesson.as_str(), lesson.subtitle());
    }
    println!();
}

fn load_table(config: &AppConfig) -> anyhow::Result<TransitionTable> {
    match &config.sampler.table_path {
        Some(path) => TransitionTable::from_file(path)
            .with_context(|| format!("loading transition table {}", path.display())),
        None => Ok(TransitionTable::builtin()),
    }
}

async fn run_predict(config: &AppConfig, seed: Option<u64>, delay: bool) -> anyhow::Result<()> {
    let table = load_table(config)?;
    let sampler = match seed {
        Some(seed) => Sampler::with_seed(table, &config.sampler, seed),
        None => Sampler::new(table, &config.sampler),
    };
    let mut session = GenerationSession::new(sampler, &config.session);

    header(LessonId::Prediction);
    loop {
        println!("{}", token_sequence_box(session.history(), true, "Sentence"));
        println!("  Context: {}", context_badge(session.context_kind()));
        let resolved = session.sampler().resolve(session.generated_text());
        println!("  Looking at: {}\n", resolved.level.describe());
        println!("{}", probability_bars(session.candidates(), 30));
        for (i, c) in session.candidates().iter().enumerate() {
            println!("  {}) {}", i + 1, c.word);
        }

        let Some(input) = prompt("\nPick a number or word ('r' reset, 'q' quit): ")? else {
            break;
        };
        match input.as_str() {
            "" => continue,
            "q" => break,
            "r" => {
                session.reset();
                continue;
            }
            _ => {}
        }

        let word = match input.parse::<usize>() {
            Ok(n) => match n.checked_sub(1).and_then(|i| session.candidates().get(i)) {
                Some(c) => c.word.clone(),
                None => {
                    println!("⚠️  No candidate #{n}");
                    continue;
                }
            },
            Err(_) => input,
        };

        let result = if delay {
            println!("🤔 Thinking...");
            session.advance_with_delay(&word).await.map(|_| ())
        } else {
            session.advance(&word).map(|_| ())
        };
        if let Err(e) = result {
            println!("⚠️  {e}");
        }
    }

    println!("\nFinal sentence: {}", session.generated_text());
    Ok(())
}

fn run_context(config: &AppConfig) -> anyhow::Result<()> {
    let mut window = ContextWindow::from_config(&config.context_window);

    header(LessonId::Context);
    loop {
        println!("{}", context_window_belt(&window.to_vec(), window.capacity()));
        if let Some(next) = window.next_to_evict()
            && window.is_full()
        {
            println!("  Next to be forgotten: {next}");
        }

        let Some(input) = prompt("\nAdd a word ('c' clear, 'q' quit): ")? else {
            break;
        };
        match input.as_str() {
            "q" => break,
            "c" => window.clear(),
            text => {
                for gone in window.push(text) {
                    println!("  👋 '{gone}' fell out of memory");
                }
            }
        }
    }

    println!(
        "{}",
        insight_box(
            "Real models have windows of a million tokens or more,\nbut the rule is the same: the oldest text goes first.",
            "💡"
        )
    );
    Ok(())
}

async fn run_roleplay(config: &AppConfig, role: &str) -> anyhow::Result<()> {
    let client = GeminiClient::new(&config.chat)?;
    if !client.has_api_key() {
        println!("⚠️  No API key found. Set GEMINI_API_KEY to get real replies.");
    }
    let mut chat = RolePlay::new(Arc::new(client));
    chat.change_role(role)?;

    header(LessonId::SystemPrompt);
    let roles: Vec<&str> = PRESETS.iter().map(|p| p.id).collect();
    println!("  Roles: {}  (switch with '/role <id>', 'q' quits)", roles.join(", "));

    loop {
        let preset = chat.preset();
        println!("\n{} {} : {}", preset.mood.face(), preset.label, preset.instruction);
        let Some(input) = prompt("You: ")? else {
            break;
        };
        if input == "q" {
            break;
        }
        if let Some(id) = input.strip_prefix("/role ") {
            if let Err(e) = chat.change_role(id) {
                println!("⚠️  {e}");
            }
            continue;
        }
        if let Some(reply) = chat.send(&input).await {
            println!("{}", box_text(&reply.text, preset.label, 64));
        }
    }
    Ok(())
}

fn run_attention(focus: Option<usize>, heatmap: bool) -> anyhow::Result<()> {
    header(LessonId::Attention);
    if let Some(i) = focus {
        anyhow::ensure!(
            i < attention::SENTENCE.len(),
            "focus must be between 0 and {}",
            attention::SENTENCE.len() - 1
        );
    }

    println!(
        "  {}\n",
        attention_spotlight(&attention::SENTENCE, &attention::spotlight(focus))
    );
    if let Some(i) = focus {
        let targets: Vec<&str> = attention::attended(i)
            .iter()
            .map(|&t| attention::SENTENCE[t])
            .collect();
        if targets.is_empty() {
            println!("  '{}' doesn't look back at anything special.", attention::SENTENCE[i]);
        } else {
            println!("  '{}' pays attention to: {}", attention::SENTENCE[i], targets.join(", "));
        }
    }
    if heatmap {
        println!(
            "\n{}",
            attention_heatmap_ascii(&attention::weight_matrix(), &attention::SENTENCE, 8)
        );
    }
    Ok(())
}

fn run_embeddings(word: Option<&str>) -> anyhow::Result<()> {
    header(LessonId::Embeddings);

    println!("  Old school: count the words\n");
    for a in DOCUMENTS {
        for b in DOCUMENTS.iter().filter(|b| b.id > a.id) {
            let sim = cosine_similarity(&a.term_vector(), &b.term_vector());
            println!("  \"{}\" vs \"{}\": {:.0}%", a.text, b.text, sim * 100.0);
        }
    }

    println!("\n  Neural: words on a map\n");
    println!("{}", word_map_ascii(WORD_MAP, word, 50, 16));

    if let Some(word) = word {
        println!("\n  Nearest to {word}:");
        for (point, distance) in nearest_neighbors(word, 3)? {
            println!(
                "{}",
                progress_bar(
                    similarity_percent(distance) / 100.0,
                    20,
                    &format!("    {:<10} ", point.label),
                    true
                )
            );
        }
    }

    let (result, (x, y)) = analogy("King", "Man", "Woman")?;
    println!("\n  King - Man + Woman = ({x:.0}, {y:.0}) ≈ {}", result.label);
    Ok(())
}

fn run_finetune(category: Option<&str>) -> anyhow::Result<()> {
    let filter = match category {
        Some(name) => Some(
            ExampleCategory::ALL
                .into_iter()
                .find(|c| c.as_str().eq_ignore_ascii_case(name))
                .with_context(|| format!("unknown category: {name}"))?,
        ),
        None => None,
    };
    let mut school = InstructionSchool::new();

    header(LessonId::FineTuning);
    loop {
        println!("\n  Robot: {}", school.mood().face());
        for category in ExampleCategory::ALL {
            let (done, total) = school.progress(category);
            println!(
                "{}",
                progress_bar(
                    done as f32 / total.max(1) as f32,
                    12,
                    &format!("  {:<8} ", category.as_str()),
                    false
                )
            );
        }
        println!();
        let pending: Vec<_> = school
            .examples(filter)
            .filter(|(_, done)| !done)
            .map(|(e, _)| e)
            .collect();
        if pending.is_empty() {
            println!("  🎓 All examples trained.");
            break;
        }
        for example in &pending {
            println!("  [{}] {}", example.id, example.input);
        }

        let Some(input) = prompt("\nTrain which example? ('q' quit): ")? else {
            break;
        };
        if input == "q" {
            break;
        }
        match school.train(&input) {
            Ok(example) => {
                println!("\n  Instruction: {}", example.instruction);
                println!("  Input:       {}", example.input);
                println!("  Output:      {}", example.output);
            }
            Err(e) => println!("⚠️  {e}"),
        }
    }
    Ok(())
}

fn run_hallucination(key: Option<&str>) -> anyhow::Result<()> {
    header(LessonId::Hallucination);
    let scenarios: Vec<_> = match key {
        Some(key) => vec![find_scenario(key).with_context(|| format!("unknown scenario: {key}"))?],
        None => SCENARIOS.iter().collect(),
    };
    for scenario in scenarios {
        println!("  🧪 {}", scenario.title);
        println!("  Q: {}", scenario.query);
        println!("{}", box_text(scenario.answer, "Model", 64));
        println!("{}", insight_box(scenario.explanation, "🔍"));
    }
    println!("{}", insight_box(REMINDER, "⚠️"));
    Ok(())
}

fn run_pretrain(ticks: u32) {
    header(LessonId::PreTraining);
    let mut machine = LibraryMachine::new();
    for _ in 0..ticks {
        machine.tick();
    }
    println!("  Now reading: {}", machine.current_source());
    println!(
        "{}",
        progress_bar(machine.knowledge_level() / 100.0, 30, "  Knowledge ", true)
    );
    println!(
        "  Items absorbed: {}   Patterns learned: {}",
        machine.absorbed_items(),
        machine.patterns_learned()
    );
    if machine.is_saturated() {
        println!("  📚 The library has been read. Time for fine-tuning!");
    }
}
