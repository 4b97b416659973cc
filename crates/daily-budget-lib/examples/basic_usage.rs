use daily_budget_core::prelude::*;
use std::env;

fn main() -> Result<()> {
    let limit = env::args()
        .nth(1)
        .map(|arg| arg.parse::<f64>())
        .transpose()?
        .unwrap_or(1000.0);

    let mut cash_calculator = CashCalculator::new(limit);
    let mut calories_calculator = CaloriesCalculator::new(limit);

    // Money
    cash_calculator.add_record(Record::new(300.0, "coffee", None)?);
    cash_calculator.add_record(Record::new(300.0, "lunch for a friend", None)?);
    cash_calculator.add_record(Record::new(1000.0, "birthday bar", Some("19.11.2023"))?);

    // Calories
    calories_calculator.add_record(Record::new(118.0, "A piece of cake. And another one.", None)?);
    calories_calculator.add_record(Record::new(84.0, "Yogurt.", None)?);
    calories_calculator.add_record(Record::new(1140.0, "A can of crisps.", Some("24.02.2019"))?);

    println!("--- Cash (limit {}) ---", limit);
    println!("Spent today: {}", cash_calculator.get_today_stats());
    println!("Spent this week: {}", cash_calculator.get_week_stats());
    for currency in cash_calculator.rates().supported_currencies() {
        println!("{}: {}", currency, cash_calculator.get_today_cash_remained(currency));
    }

    println!("\n--- Calories (limit {}) ---", limit);
    println!("Eaten today: {}", calories_calculator.get_today_stats());
    println!("Eaten this week: {}", calories_calculator.get_week_stats());
    println!("{}", calories_calculator.get_calories_remained());

    Ok(())
}
