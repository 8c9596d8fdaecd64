//! Product command - catalog maintenance, queries and stock operations.

use common::{AppConfig, AppResult, OptionExt};
use domain::Product;
use inventory_service_lib::{InventoryManager, JsonProductStore, ProductEntry, ProductRepository};

use crate::cli::args::{FilterArgs, ProductAction, ProductArgs};

/// Execute the product command
pub fn execute(args: ProductArgs, config: &AppConfig) -> AppResult<()> {
    let store = JsonProductStore::open(&config.storage.products_path);
    let mut inventory = InventoryManager::with_threshold(store, config.inventory.low_stock_threshold);

    match args.action {
        ProductAction::Add {
            id,
            name,
            quantity,
            price,
            category,
        } => {
            let product = Product::new(name, quantity, price, category);
            inventory.repo_mut().add(&id, product)?;
            println!("Product {} added.", id);
        }
        ProductAction::Update {
            id,
            name,
            quantity,
            price,
            category,
        } => {
            let mut product = inventory
                .repo()
                .get(&id)
                .ok_or_not_found(format!("Product {}", id))?;
            if let Some(name) = name {
                product.product_name = name;
            }
            if let Some(quantity) = quantity {
                product.quantity = quantity;
            }
            if let Some(price) = price {
                product.price = price;
            }
            if let Some(category) = category {
                product.category = category;
            }
            inventory.repo_mut().update(&id, product)?;
            println!("Product {} updated.", id);
        }
        ProductAction::Remove { id } => {
            if inventory.repo_mut().remove(&id)? {
                println!("Product {} removed.", id);
            } else {
                println!("Product {} not found.", id);
            }
        }
        ProductAction::Show { id } => {
            let product = inventory
                .repo()
                .get(&id)
                .ok_or_not_found(format!("Product {}", id))?;
            println!("{}: {}", id, product);
        }
        ProductAction::Find { name } => {
            let entry = inventory
                .repo()
                .find_by_name(&name)
                .ok_or_not_found(format!("Product named '{}'", name))?;
            print_entries(&[entry]);
        }
        ProductAction::List => {
            let products = inventory.repo().list();
            if products.is_empty() {
                println!("The catalog is empty.");
            }
            print_entries(&products);
        }
        ProductAction::Value => {
            println!("Total inventory value: ${:.2}", inventory.repo().total_value());
        }
        ProductAction::Filter(filter) => run_filter(inventory.repo(), filter),
        ProductAction::Restock { id, quantity } => {
            let product = inventory.restock(&id, quantity)?;
            println!("{}: {}", id, product);
        }
        ProductAction::Price { id, price } => {
            let product = inventory.set_price(&id, price)?;
            println!("{}: {}", id, product);
        }
        ProductAction::Discount { id, percent } => {
            let product = inventory.apply_discount(&id, percent)?;
            println!("{}: {}", id, product);
        }
        ProductAction::Report { threshold } => {
            println!("{}", inventory.stock_report(threshold));
        }
    }

    Ok(())
}

fn run_filter<R: ProductRepository>(repo: &R, filter: FilterArgs) {
    if let Some(threshold) = filter.low_quantity {
        match repo.filter_by_low_quantity(threshold) {
            Some(entries) => print_entries(&entries),
            None => println!("No products with quantity below {}.", threshold),
        }
        return;
    }

    let entries = match (filter.price_below, filter.category) {
        (Some(price), _) => repo.filter_by_price_below(price),
        (None, Some(category)) => repo.filter_by_category(category),
        (None, None) => Vec::new(),
    };
    if entries.is_empty() {
        println!("No matching products.");
    }
    print_entries(&entries);
}

fn print_entries(entries: &[ProductEntry]) {
    for (id, product) in entries {
        println!("{}: {}", id, product);
    }
}
