use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xorshift64*)
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng {
            state: seed.wrapping_mul(6364136223846793005).wrapping_add(1) | 1,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }
}

/// `1234567` → `"1,234,567"`
fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Domain.csv".to_string());
    let rows: usize = match std::env::args().nth(2) {
        Some(n) => n.parse().context("row count must be a positive integer")?,
        None => 137,
    };

    let mut rng = SimpleRng::new(42);

    let words = [
        "acme", "blue", "cloud", "delta", "echo", "fjord", "green", "harbor", "iris", "jade",
        "kite", "lumen", "maple", "nova", "orbit", "pixel",
    ];
    let tlds = ["com", "net", "org", "io", "co.nz", "dev"];
    let categories = ["News", "Shopping", "Technology", "Travel", "Finance", "Education"];
    let countries = ["NZ", "AU", "US", "GB", "DE", "JP", "IN"];

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["Domain", "Traffic", "Category", "Country"])?;

    for i in 0..rows {
        let domain = format!(
            "{}{}{i}.{}",
            rng.pick(&words),
            rng.pick(&words),
            rng.pick(&tlds)
        );
        // Roughly one in eight rows has no traffic figure.
        let traffic = if rng.below(8) == 0 {
            String::new()
        } else {
            with_thousands(rng.below(5_000_000))
        };
        writer.write_record([
            domain.as_str(),
            traffic.as_str(),
            rng.pick(&categories),
            rng.pick(&countries),
        ])?;
    }
    writer.flush().context("flushing CSV writer")?;

    println!("Wrote {rows} domains to {output_path}");
    Ok(())
}
