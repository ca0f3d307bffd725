//! 酒吧盤點完整範例
//!
//! 展示從產品目錄到採購單草稿的完整盤點對帳流程

use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use stock_cache::ProductCache;
use stock_calc::{
    dedupe_products_by_name, PremixCalculator, ReconciliationCalculator, ReorderOutcome,
    ReorderPlanner,
};
use stock_core::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("===== Bar Recount Example =====\n");

    // 步驟 1: 產品目錄（含一筆重複的舊檔）
    println!("[1] Build Catalog");
    let catalog = dedupe_products_by_name(&build_catalog());
    println!("    {} products after dedupe", catalog.len());

    let mut products_by_id: HashMap<String, Product> = catalog
        .iter()
        .map(|p| (p.id.clone(), p.clone()))
        .collect();

    // 步驟 2: 解析預調酒成本
    println!("\n[2] Resolve Premix Cost");
    let negroni = products_by_id.get("MIX-NEGRONI").cloned().unwrap();
    let cost = PremixCalculator::effective_cost(&negroni, &products_by_id);
    println!("    MIX-NEGRONI: {} per bottle", cost.round_dp(2));
    products_by_id.get_mut("MIX-NEGRONI").unwrap().cost_per_bottle = cost;

    // 配方展開：調一杯 250ml 需要多少成分
    for draw in PremixCalculator::expand_to_ingredients(&negroni, Decimal::from(250))? {
        println!("    250ml draw -> {} {}ml", draw.product_id, draw.volume_ml);
    }

    // 步驟 3: 盤點場次
    println!("\n[3] Counting Session");
    let session_date = NaiveDate::from_ymd_opt(2025, 12, 22).unwrap();
    let mut session = CountingSession::start(session_date, &catalog);
    enter_counts(&mut session);
    session.complete();

    let calcs = ReconciliationCalculator::calculate_session(&session.lines, &products_by_id);
    for (line, calc) in session.lines.iter().zip(&calcs) {
        println!(
            "    {}: theoretical {}ml, diff {}ml / {} / {}%",
            line.product_id,
            calc.theoretical_end_stock_ml,
            calc.difference_volume_ml,
            calc.difference_money.round_dp(2),
            calc.difference_percent.round_dp(1),
        );
    }

    // 步驟 4: 補貨規劃（12/24 平安夜在 5 天視窗內）
    println!("\n[4] Reorder Planning");
    let mut holidays = HolidayCalendar::new();
    holidays.add_holiday(
        NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
        "Christmas Eve",
    );

    let mut suppliers = HashMap::new();
    suppliers.insert("JAMESON-700".to_string(), "VENDOR-01".to_string());
    suppliers.insert("BEER-330".to_string(), "VENDOR-02".to_string());

    let planner = ReorderPlanner::new(holidays);
    match planner.plan(session_date, &session.lines, &products_by_id, &suppliers) {
        ReorderOutcome::NoReorderNeeded => println!("    nothing to order"),
        ReorderOutcome::Planned(plan) => {
            if let Some(name) = &plan.holiday {
                println!("    holiday {} ahead, multiplier x{}", name, plan.multiplier);
            }
            for order in &plan.orders {
                println!(
                    "    PO draft {} for {}: {} lines, est. {}",
                    order.id,
                    order.supplier_id,
                    order.lines.len(),
                    order.total_cost()
                );
                for line in &order.lines {
                    println!("      {} x{} @ {}", line.product_id, line.quantity, line.cost_per_item);
                }
            }
            for skipped in &plan.skipped_without_supplier {
                println!("    skipped (no supplier): {}", skipped);
            }
        }
    }

    // 步驟 5: 持久層端的產品快取
    println!("\n[5] Product Cache (persistence side)");
    let mut cache = ProductCache::new(Duration::minutes(5));
    let now = Utc::now();
    for product in products_by_id.values() {
        cache.set(product.clone(), now);
    }
    println!("    cached {} products", cache.len());
    cache.invalidate("MIX-NEGRONI");
    println!("    after invalidate: {}", cache.len());

    Ok(())
}

fn build_catalog() -> Vec<Product> {
    vec![
        Product::new(
            "JAMESON-OLD".to_string(),
            "  jameson  ".to_string(),
            ProductCategory::Whisky,
            Decimal::from(700),
        )
        .with_active(false),
        Product::new(
            "JAMESON-700".to_string(),
            "Jameson".to_string(),
            ProductCategory::Whisky,
            Decimal::from(700),
        )
        .with_cost_per_bottle(Decimal::from(2000))
        .with_portion(Decimal::from(180), Decimal::from(40))
        .with_updated_at(Utc::now())
        .with_reorder(Decimal::from(1400), Decimal::from(6)),
        Product::new(
            "GIN-700".to_string(),
            "Dry Gin".to_string(),
            ProductCategory::Gin,
            Decimal::from(700),
        )
        .with_cost_per_bottle(Decimal::from(1000))
        .with_portion(Decimal::from(150), Decimal::from(40)),
        Product::new(
            "VERMOUTH-500".to_string(),
            "Sweet Vermouth".to_string(),
            ProductCategory::Wine,
            Decimal::from(500),
        )
        .with_cost_per_bottle(Decimal::from(500)),
        Product::new(
            "BEER-330".to_string(),
            "Lager".to_string(),
            ProductCategory::Beer,
            Decimal::from(330),
        )
        .with_cost_per_bottle(Decimal::from(60))
        .with_reorder(Decimal::from(990), Decimal::from(24)),
        Product::new(
            "MIX-NEGRONI".to_string(),
            "Negroni Mix".to_string(),
            ProductCategory::Premix,
            Decimal::from(1000),
        )
        .with_portion(Decimal::from(250), Decimal::from(100))
        .with_ingredients(vec![
            PremixIngredient::new("GIN-700".to_string(), Decimal::from(600)),
            PremixIngredient::new("VERMOUTH-500".to_string(), Decimal::from(400)),
        ]),
    ]
}

fn enter_counts(session: &mut CountingSession) {
    for line in session.lines.iter_mut() {
        *line = match line.product_id.as_str() {
            "JAMESON-700" => line
                .clone()
                .with_start_stock(Decimal::from(1000))
                .with_purchases(Decimal::from(500))
                .with_sales(Decimal::from(10))
                .with_end_stock(Decimal::from(1000)),
            "BEER-330" => line
                .clone()
                .with_start_stock(Decimal::from(3300))
                .with_sales(Decimal::from(8))
                .with_end_stock(Decimal::from(600)),
            "MIX-NEGRONI" => line
                .clone()
                .with_start_stock(Decimal::from(2000))
                .with_sales(Decimal::from(5))
                .with_end_stock(Decimal::from(1480)),
            _ => line.clone().with_end_stock(Decimal::from(800)),
        };
    }
}
