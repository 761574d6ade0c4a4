//! # Seed Data Generator
//!
//! Populates the database with the cosmetics-shop demo data set.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p duka-db --bin seed
//!
//! # Specify database path
//! cargo run -p duka-db --bin seed -- --db ./data/duka.db
//! ```
//!
//! Loads 4 suppliers, 27 products across skincare/makeup/hair/baby
//! categories, 5 customers and 5 expenses, then records a few demo sales
//! through the ledger. Refuses to run against a non-empty database.

use chrono::{Days, Utc};
use std::env;
use tracing_subscriber::EnvFilter;

use duka_core::{NewCustomer, NewExpense, NewProduct, NewSupplier, PaymentMethod, SaleRequest};
use duka_db::{Database, DbConfig};

/// (name, contact, email, address, products_supplied, delivery_time, credit_terms)
const SUPPLIERS: &[(&str, &str, &str, &str, &str, &str, &str)] = &[
    (
        "Beauty Supplies Kenya",
        "John Mwangi",
        "john@beautysupplies.co.ke",
        "Mombasa Road, Nairobi",
        "Lotions, Creams, Hair Products",
        "3-5 days",
        "Net 30",
    ),
    (
        "Cosmetic Hub Africa",
        "Sarah Ochieng",
        "sarah@cosmetichub.co.ke",
        "Westlands, Nairobi",
        "Makeup, Skincare",
        "2-3 days",
        "Net 15",
    ),
    (
        "Hair Care Direct",
        "Peter Oduya",
        "peter@haircare.co.ke",
        "Kasarani, Nairobi",
        "Hair Products, Shampoos",
        "1-2 days",
        "Cash on Delivery",
    ),
    (
        "Baby Care Distributors",
        "Mary Akinyi",
        "mary@babycare.co.ke",
        "Industrial Area, Nairobi",
        "Baby Products, Diapers",
        "2-4 days",
        "Net 30",
    ),
];

/// (name, brand, category, buying KSh, selling KSh, quantity, reorder, supplier index)
const PRODUCTS: &[(&str, &str, &str, i64, i64, i64, i64, usize)] = &[
    // Skincare
    ("Moisturizing Lotion", "Nivea", "skincare", 250, 450, 50, 15, 0),
    ("Sunscreen SPF 50", "L'Oréal", "skincare", 800, 1200, 30, 10, 1),
    ("Face Wash", "CeraVe", "skincare", 600, 950, 40, 12, 1),
    ("Night Cream", "Olay", "skincare", 900, 1400, 25, 8, 1),
    ("Body Lotion", "Vaseline", "skincare", 180, 350, 60, 20, 0),
    ("Lip Balm", "Carmol", "skincare", 80, 150, 100, 30, 0),
    ("Face Serum", "The Ordinary", "skincare", 1200, 1800, 20, 5, 1),
    // Makeup
    ("Lipstick", "Maybelline", "makeup", 350, 600, 45, 15, 1),
    ("Foundation", "Fenty Beauty", "makeup", 1800, 2800, 15, 5, 1),
    ("Mascara", "L'Oréal", "makeup", 450, 750, 35, 10, 1),
    ("Eyeliner", "Essence", "makeup", 200, 400, 50, 15, 1),
    ("Blush", "NYX", "makeup", 400, 700, 30, 10, 1),
    ("Concealer", "Maybelline", "makeup", 500, 850, 25, 8, 1),
    ("Nail Polish", "Essie", "makeup", 300, 550, 40, 12, 1),
    // Hair care
    ("Shampoo", "Head & Shoulders", "hair", 250, 450, 80, 25, 2),
    ("Hair Conditioner", "Pantene", "hair", 280, 480, 60, 20, 2),
    ("Hair Oil", "Murray's", "hair", 180, 350, 70, 20, 2),
    ("Hair Serum", "Argan", "hair", 450, 750, 40, 12, 2),
    ("Hair Spray", "VO5", "hair", 200, 380, 50, 15, 2),
    ("Hair Gel", "Ampro", "hair", 120, 250, 65, 20, 2),
    // Baby care
    ("Baby Lotion", "Johnson's", "baby", 200, 380, 50, 15, 3),
    ("Baby Shampoo", "Gentle Baby", "baby", 180, 350, 55, 18, 3),
    ("Baby Powder", "Fever", "baby", 150, 300, 60, 20, 3),
    ("Diapers Size Small", "Pampers", "baby", 800, 1200, 25, 10, 3),
    ("Diapers Size Medium", "Pampers", "baby", 900, 1350, 30, 10, 3),
    ("Baby Wipes", "WaterWipes", "baby", 350, 550, 45, 15, 3),
    ("Baby Oil", "Johnson's", "baby", 220, 400, 40, 12, 3),
];

/// (name, phone, email, skin_type, hair_type, notes)
const CUSTOMERS: &[(&str, &str, &str, &str, &str, &str)] = &[
    (
        "Grace Atieno",
        "0712345678",
        "grace@gmail.com",
        "dry",
        "normal",
        "Prefers natural products",
    ),
    (
        "Faith Wanjiku",
        "0723456789",
        "faith@yahoo.com",
        "oily",
        "dry",
        "Buys often",
    ),
    (
        "Joyce Akinyi",
        "0734567890",
        "joyce@gmail.com",
        "combination",
        "normal",
        "",
    ),
    (
        "Mary Nyong'o",
        "0745678901",
        "mary@email.com",
        "sensitive",
        "dry",
        "Allergic to fragrances",
    ),
    (
        "Sarah Kemunto",
        "0756789012",
        "sarah@gmail.com",
        "normal",
        "oily",
        "",
    ),
];

/// (days ago, category, description, amount KSh)
const EXPENSES: &[(u64, &str, &str, i64)] = &[
    (1, "rent", "Monthly Shop Rent", 25000),
    (2, "transport", "Transport for stock pickup", 2500),
    (3, "utilities", "Electricity Bill", 4500),
    (5, "stock_purchase", "Stock from Beauty Supplies", 35000),
    (7, "other", "Shop Maintenance", 3000),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./duka_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Duka Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./duka_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Duka Seed Data Generator");
    println!("========================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("Connected to database, migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("Database already has {} products", existing);
        println!("Skipping seed to avoid duplicates.");
        println!("Delete the database file to regenerate.");
        return Ok(());
    }

    // Suppliers first: products reference them by id.
    let mut supplier_ids = Vec::new();
    for (name, contact, email, address, supplied, delivery, terms) in SUPPLIERS {
        let supplier = db
            .suppliers()
            .create(&NewSupplier {
                name: name.to_string(),
                contact: Some(contact.to_string()),
                email: Some(email.to_string()),
                address: Some(address.to_string()),
                products_supplied: Some(supplied.to_string()),
                delivery_time: Some(delivery.to_string()),
                credit_terms: Some(terms.to_string()),
            })
            .await?;
        supplier_ids.push(supplier.id);
    }
    println!("Seeded {} suppliers", supplier_ids.len());

    let mut product_ids = Vec::new();
    for (name, brand, category, buying, selling, quantity, reorder, supplier_idx) in PRODUCTS {
        let product = db
            .products()
            .create(&NewProduct {
                name: name.to_string(),
                brand: Some(brand.to_string()),
                category: Some(category.to_string()),
                buying_price_cents: buying * 100,
                selling_price_cents: selling * 100,
                quantity: *quantity,
                reorder_level: Some(*reorder),
                supplier_id: supplier_ids.get(*supplier_idx).cloned(),
                expiry_date: None,
            })
            .await?;
        product_ids.push(product.id);
    }
    println!("Seeded {} products", product_ids.len());

    let mut customer_ids = Vec::new();
    for (name, phone, email, skin, hair, notes) in CUSTOMERS {
        let customer = db
            .customers()
            .create(&NewCustomer {
                name: name.to_string(),
                phone: Some(phone.to_string()),
                email: Some(email.to_string()),
                skin_type: Some(skin.to_string()),
                hair_type: Some(hair.to_string()),
                notes: if notes.is_empty() {
                    None
                } else {
                    Some(notes.to_string())
                },
            })
            .await?;
        customer_ids.push(customer.id);
    }
    println!("Seeded {} customers", customer_ids.len());

    let today = Utc::now().date_naive();
    for (days_ago, category, description, amount) in EXPENSES {
        db.expenses()
            .create(&NewExpense {
                date: today.checked_sub_days(Days::new(*days_ago)).unwrap_or(today),
                category: Some(category.to_string()),
                description: Some(description.to_string()),
                amount_cents: amount * 100,
            })
            .await?;
    }
    println!("Seeded {} expenses", EXPENSES.len());

    // A few sales through the ledger so the dashboard has something to show.
    let demo_sales: &[(usize, Option<usize>, i64, PaymentMethod)] = &[
        (0, Some(0), 2, PaymentMethod::Cash),   // lotion for Grace
        (7, Some(1), 1, PaymentMethod::Mobile), // lipstick for Faith
        (14, None, 3, PaymentMethod::Cash),     // walk-in shampoo sale
        (8, Some(2), 1, PaymentMethod::Card),   // foundation for Joyce
    ];

    for (product_idx, customer_idx, quantity, method) in demo_sales {
        let sale = db
            .sales()
            .record_sale(&SaleRequest {
                product_id: product_ids[*product_idx].clone(),
                customer_id: (*customer_idx).map(|c| customer_ids[c].clone()),
                quantity: *quantity,
                payment_method: *method,
            })
            .await?;
        println!("  Recorded sale {}", sale.receipt_number);
    }

    println!();
    println!("Seed complete!");

    let summary = db.reports().dashboard_summary().await?;
    println!(
        "  Dashboard: {} products ({} low stock), {} customers, {} suppliers",
        summary.total_products, summary.low_stock, summary.total_customers, summary.total_suppliers
    );
    println!(
        "  Today: revenue {} cents, profit {} cents",
        summary.today_revenue_cents, summary.today_profit_cents
    );

    Ok(())
}
