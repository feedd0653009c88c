use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n.max(1)
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

/// "1234567" → "1 234 567"
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// `(brand, model, base price in tenge)`
const MODELS: &[(&str, &str, f64)] = &[
    ("Toyota", "Camry", 14_000_000.0),
    ("Toyota", "Corolla", 9_000_000.0),
    ("Toyota", "Land Cruiser Prado", 25_000_000.0),
    ("Hyundai", "Accent", 6_500_000.0),
    ("Hyundai", "Tucson", 12_000_000.0),
    ("Kia", "Rio", 6_000_000.0),
    ("Kia", "Sportage", 11_500_000.0),
    ("Lada", "Granta", 3_800_000.0),
    ("Lada", "Vesta", 5_200_000.0),
    ("Chevrolet", "Cobalt", 5_000_000.0),
    ("Volkswagen", "Polo", 6_800_000.0),
    ("Mercedes-Benz", "E 200", 18_000_000.0),
];

const CITIES: &[&str] = &[
    "Алматы", "Астана", "Шымкент", "Караганда", "Актобе", "Павлодар",
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "jul-07_17-55-24.csv";
    let snapshot = NaiveDate::from_ymd_opt(2025, 7, 7)
        .and_then(|d| d.and_hms_opt(17, 55, 24))
        .context("invalid snapshot date")?;

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    // Leading/trailing spaces in headers mirror real exports.
    writer.write_record([
        "Марка",
        "Модель",
        "Город",
        " Год выпуска",
        "Пробег ",
        "Цена",
        "Дата публикации",
    ])?;

    let n_rows = 600;
    for i in 0..n_rows {
        let (brand, model, base_price) = MODELS[rng.below(MODELS.len())];
        let city = rng.pick(CITIES);
        let year = 2005 + rng.below(20) as i32;
        let age = (2025 - year).max(0) as f64;

        // Round to 5 000 km so identical mileage texts recur.
        let mileage = ((age * 15_000.0 * (0.5 + rng.next_f64())) / 5_000.0).round() as u64 * 5_000;
        let price = (base_price * 0.92_f64.powf(age) * (0.85 + 0.3 * rng.next_f64()) / 10_000.0)
            .round() as u64
            * 10_000;

        let mileage_text = format!("{} км", group_thousands(mileage));
        let price_text = match i % 4 {
            0 => format!("{} ₸", group_thousands(price)),
            1 => format!("{}₸", group_thousands(price)),
            2 => format!("{} тг", group_thousands(price)),
            _ => price.to_string(),
        };

        let published = snapshot - Duration::minutes(rng.below(60 * 24 * 90) as i64);
        let published_text = match i % 50 {
            0 => String::new(),
            1 => "вчера".to_string(),
            2 => published.format("%Y-%m-%dT%H:%M:%S+05:00").to_string(),
            _ => published.format("%Y-%m-%d %H:%M:%S").to_string(),
        };

        writer.write_record([
            brand.to_string(),
            model.to_string(),
            city.to_string(),
            year.to_string(),
            mileage_text,
            price_text,
            published_text,
        ])?;
    }
    writer.flush()?;

    println!("Wrote {n_rows} listings to {output_path}");
    Ok(())
}
