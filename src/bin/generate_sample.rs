//! Writes a deterministic synthetic `EA.csv` so the dashboard can be tried
//! without the real attrition export.

use anyhow::{Context, Result};

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn range_i64(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as i64
    }

    fn pick<'a>(&mut self, options: &'a [&'a str]) -> &'a str {
        options[(self.next_f64() * options.len() as f64) as usize]
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let roles_by_department: [(&str, &[&str]); 3] = [
        (
            "Sales",
            &["Sales Executive", "Sales Representative", "Manager"],
        ),
        (
            "Research & Development",
            &[
                "Research Scientist",
                "Laboratory Technician",
                "Healthcare Representative",
                "Manager",
            ],
        ),
        ("Human Resources", &["Human Resources", "Manager"]),
    ];
    let genders = ["Female", "Male"];
    let marital = ["Divorced", "Married", "Single"];
    let travel = ["Non-Travel", "Travel_Rarely", "Travel_Frequently"];

    let output_path = "EA.csv";
    let mut wtr = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    wtr.write_record([
        "Age",
        "Attrition",
        "BusinessTravel",
        "Department",
        "DistanceFromHome",
        "EnvironmentSatisfaction",
        "Gender",
        "JobRole",
        "JobSatisfaction",
        "MaritalStatus",
        "MonthlyIncome",
        "OverTime",
        "PerformanceRating",
        "TotalWorkingYears",
        "WorkLifeBalance",
        "YearsAtCompany",
    ])?;

    let n_rows = 500;
    for _ in 0..n_rows {
        let (department, roles) =
            roles_by_department[(rng.next_f64() * roles_by_department.len() as f64) as usize];
        let job_role = rng.pick(roles);
        let gender = rng.pick(&genders);
        let marital_status = rng.pick(&marital);
        let business_travel = rng.pick(&travel);

        let age = rng.range_i64(18, 60);
        let total_working_years = rng.range_i64(0, (age - 18).min(40));
        let years_at_company = rng.range_i64(0, total_working_years.min(25));
        let distance = rng.range_i64(1, 29);
        let overtime = rng.next_f64() < 0.3;

        let env_satisfaction = rng.range_i64(1, 4);
        let job_satisfaction = rng.range_i64(1, 4);
        let work_life_balance = rng.range_i64(1, 4);
        let performance = if rng.next_f64() < 0.85 { 3 } else { 4 };

        // Income grows with seniority, with lognormal-ish noise.
        let income = (rng.gauss(2500.0 + 450.0 * total_working_years as f64, 900.0))
            .clamp(1000.0, 20000.0)
            .round() as i64;

        // Attrition odds rise with overtime, commute length, and low
        // satisfaction; younger employees leave more often.
        let mut odds: f64 = 0.08;
        if overtime {
            odds += 0.18;
        }
        odds += 0.02 * (4 - job_satisfaction) as f64;
        odds += 0.01 * (4 - work_life_balance) as f64;
        odds += 0.002 * distance as f64;
        if age < 30 {
            odds += 0.08;
        }
        let attrition = rng.next_f64() < odds;

        wtr.write_record([
            age.to_string(),
            if attrition { "Yes" } else { "No" }.to_string(),
            business_travel.to_string(),
            department.to_string(),
            distance.to_string(),
            env_satisfaction.to_string(),
            gender.to_string(),
            job_role.to_string(),
            job_satisfaction.to_string(),
            marital_status.to_string(),
            income.to_string(),
            if overtime { "Yes" } else { "No" }.to_string(),
            performance.to_string(),
            total_working_years.to_string(),
            work_life_balance.to_string(),
            years_at_company.to_string(),
        ])?;
    }
    wtr.flush()?;

    println!("Wrote {n_rows} employee records to {output_path}");
    Ok(())
}
