use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use moodring::{FixedClock, MoodDatabase, MoodStore};
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::PathBuf;
use std::rc::Rc;

const PHRASES: &[&str] = &[
    "Great job on the release everyone!",
    "The new dashboard looks awesome",
    "Stuck on this flaky test again",
    "Deploy failed, looking into it",
    "Thanks for the help with the review",
    "Happy to pair on the API work this afternoon",
    "This bug is driving me crazy",
    "Standup moved to 10:30",
    "Love the new onboarding flow",
    "Build is broken on main, not great",
    "Excited about the roadmap for next quarter",
    "Tired after that incident, but we fixed it",
    "Design review went well",
    "Not happy with the latency numbers",
    "Nice work on the migration",
];

/// 時間範囲をまたいだデモ用メッセージを生成
#[derive(Parser, Debug)]
#[command(name = "generate_test_data", about = "Seed a mood database with demo messages")]
struct Args {
    /// 書き込み先のデータベース
    #[arg(long, default_value = "moodring-demo.db")]
    db: PathBuf,

    /// 生成するメッセージ数
    #[arg(long, default_value_t = 40)]
    count: usize,

    /// 何時間前まで遡るか
    #[arg(long, default_value_t = 24)]
    hours: i64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    anyhow::ensure!(args.hours > 0, "--hours must be positive");

    let now = Utc::now();
    let clock = Rc::new(FixedClock::new(now));
    let database = MoodDatabase::new(&args.db)?;
    let mut store = MoodStore::new(database, clock.clone());

    seed_messages(
        &mut store,
        &clock,
        now,
        args.count,
        args.hours,
        &mut rand::thread_rng(),
    )?;

    println!(
        "✅ Generated {} messages over the last {}h in {}",
        args.count,
        args.hours,
        args.db.display()
    );

    Ok(())
}

/// 名簿のメンバーからランダムに投稿する（古い順）
fn seed_messages<R: Rng>(
    store: &mut MoodStore,
    clock: &FixedClock,
    now: DateTime<Utc>,
    count: usize,
    hours: i64,
    rng: &mut R,
) -> anyhow::Result<()> {
    let span_secs = hours * 3600;
    let mut offsets: Vec<i64> = (0..count).map(|_| rng.gen_range(1..=span_secs)).collect();
    offsets.sort_unstable_by(|a, b| b.cmp(a));

    // 既存DBの名簿に合わせる
    let authors: Vec<String> = store.team_members().iter().map(|m| m.id.clone()).collect();
    anyhow::ensure!(!authors.is_empty(), "team roster is empty");

    for offset in offsets {
        clock.set(now - Duration::seconds(offset));

        let author = authors.choose(rng).map(String::as_str).unwrap_or("1");
        let text = PHRASES.choose(rng).copied().unwrap_or("Hello team");
        store.ingest(author, text)?;
    }

    Ok(())
}
