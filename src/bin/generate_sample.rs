use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use modal_mass::config::{DATA_FILE, INPUT_DIR};
use modal_mass::data::loader::format_row;
use modal_mass::Axis;

const MODES: usize = 12;
const TOTAL_MASS: f64 = 10.188;

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
}

/// Effective-mass ratios for one axis: a few dominant modes, the rest small,
/// scaled so the axis captures between 70% and 95% of the total mass.
fn mass_ratios(rng: &mut SimpleRng) -> Vec<f64> {
    let raw: Vec<f64> = (0..MODES)
        .map(|_| {
            let r = rng.next_f64();
            if r > 0.8 {
                r * 10.0
            } else {
                r.powi(4)
            }
        })
        .collect();
    let captured = 0.70 + 0.25 * rng.next_f64();
    let sum: f64 = raw.iter().sum::<f64>().max(f64::EPSILON);
    raw.iter().map(|v| v / sum * captured).collect()
}

fn participation_table(out: &mut String, axis: Axis, frequencies: &[f64], ratios: &[f64]) {
    let largest = ratios.iter().copied().fold(0.0, f64::max).sqrt().max(f64::EPSILON);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        " ***** PARTICIPATION FACTOR CALCULATION *****  {}",
        axis.marker()
    );
    let _ = writeln!(
        out,
        "                                                                                   CUMULATIVE     RATIO EFF.MASS"
    );
    let _ = writeln!(
        out,
        "  MODE   FREQUENCY       PERIOD       PARTIC.FACTOR     RATIO     EFFECTIVE MASS   MASS FRACTION   TO TOTAL MASS"
    );

    let mut fraction = 0.0;
    for (i, (&frequency, &ratio)) in frequencies.iter().zip(ratios).enumerate() {
        let effective_mass = ratio * TOTAL_MASS;
        let factor = effective_mass.sqrt();
        fraction += ratio;
        let _ = writeln!(
            out,
            "{}",
            format_row(&[
                (i + 1) as f64,
                frequency,
                1.0 / frequency,
                factor,
                ratio.sqrt() / largest,
                effective_mass,
                fraction,
                ratio,
            ])
        );
    }
    let _ = writeln!(out, " sum{:>79.6e}", fraction * TOTAL_MASS);
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut frequency = 3.0;
    let frequencies: Vec<f64> = (0..MODES)
        .map(|_| {
            frequency += 0.2 + 4.0 * rng.next_f64();
            frequency
        })
        .collect();

    let mut report = String::new();
    let _ = writeln!(report, " *** ANSYS - ENGINEERING ANALYSIS SYSTEM ***");
    let _ = writeln!(report);
    let _ = writeln!(report, " *** PRECISE MASS SUMMARY ***");
    let _ = writeln!(report);
    let _ = writeln!(report, "   NUMBER OF MODES ={MODES:>4}");
    let _ = writeln!(report, "   TOTAL MASS ={TOTAL_MASS:>12.5}");

    for axis in Axis::ALL {
        let ratios = mass_ratios(&mut rng);
        participation_table(&mut report, axis, &frequencies, &ratios);
    }

    let dir = PathBuf::from(INPUT_DIR);
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(DATA_FILE);
    std::fs::write(&path, report).with_context(|| format!("writing {}", path.display()))?;

    println!("Wrote {MODES} modes x 3 directions to {}", path.display());
    Ok(())
}
