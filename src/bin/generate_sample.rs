use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

use item_analysis::analysis::birnbaum::{predict, predict_reversed};
use item_analysis::analysis::ItemParameters;

/// Write synthetic responses drawn from the Birnbaum model.
#[derive(Parser)]
#[command(name = "generate_sample", version)]
struct Args {
    /// Examinees per ability level
    #[arg(long, default_value_t = 40)]
    per_level: usize,
    /// Lowest ability level
    #[arg(long, default_value_t = -3, allow_hyphen_values = true)]
    min_ability: i64,
    /// Highest ability level
    #[arg(long, default_value_t = 6)]
    max_ability: i64,
    #[arg(long, default_value_t = ItemParameters::default().guessing)]
    guessing: f64,
    #[arg(long, default_value_t = ItemParameters::default().difficulty)]
    difficulty: f64,
    /// Draw from the reversed curve instead, producing a badly behaved item
    #[arg(long)]
    reversed: bool,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Output path without extension; `.csv` and `.parquet` are written
    #[arg(long, default_value = "sample_data")]
    out: PathBuf,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Bernoulli draw with success probability `p`.
    fn bernoulli(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let params = ItemParameters::new(args.guessing, args.difficulty)?;
    let mut rng = SimpleRng::new(args.seed);

    let mut outcomes: Vec<i64> = Vec::new();
    let mut abilities: Vec<i64> = Vec::new();

    for ability in args.min_ability..=args.max_ability {
        let theta = ability as f64;
        let p = if args.reversed {
            predict_reversed(params.guessing, params.difficulty, theta)
        } else {
            predict(params.guessing, params.difficulty, theta)
        };
        for _ in 0..args.per_level {
            outcomes.push(rng.bernoulli(p) as i64);
            abilities.push(ability);
        }
    }

    // CSV: the headerless two-column layout the loader expects.
    let csv_path = args.out.with_extension("csv");
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&csv_path)
        .with_context(|| format!("creating {}", csv_path.display()))?;
    for (outcome, ability) in outcomes.iter().zip(&abilities) {
        writer.write_record([outcome.to_string(), ability.to_string()])?;
    }
    writer.flush()?;

    // Parquet
    let schema = Arc::new(Schema::new(vec![
        Field::new("outcome", DataType::Int64, false),
        Field::new("ability", DataType::Int64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(outcomes.clone())) as ArrayRef,
            Arc::new(Int64Array::from(abilities)) as ArrayRef,
        ],
    )
    .context("building record batch")?;

    let parquet_path = args.out.with_extension("parquet");
    let file = std::fs::File::create(&parquet_path)
        .with_context(|| format!("creating {}", parquet_path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;

    println!(
        "Wrote {} responses ({} correct) to {} and {}",
        outcomes.len(),
        outcomes.iter().filter(|&&o| o != 0).count(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
