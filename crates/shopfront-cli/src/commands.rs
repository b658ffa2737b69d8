//! Subcommand implementations.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use futures::future::join_all;
use tracing::warn;

use shopfront_core::{ApiClient, ApiError, AuthError, Config, PageRequest, Product, RegisterPayload};

use crate::utils::{format_optional, format_price, format_rating, truncate_string};

/// Width of the name column in product listings
const NAME_WIDTH: usize = 32;

/// Width of the category column in product listings
const CATEGORY_WIDTH: usize = 16;

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line).context("Failed to read input")?;
    Ok(line.trim().to_string())
}

fn prompt_password(label: &str) -> Result<String> {
    rpassword::prompt_password(format!("{}: ", label)).context("Failed to read password")
}

pub async fn login(api: &ApiClient, config: &mut Config, email: Option<String>) -> Result<()> {
    let email = match email.or_else(|| config.last_identifier.clone()) {
        Some(email) => email,
        None => prompt("Email")?,
    };
    if email.is_empty() {
        bail!("An email is required to log in");
    }
    let password = prompt_password(&format!("Password for {}", email))?;

    match api.login(&email, &password).await {
        Ok(()) => {}
        Err(AuthError::InvalidCredentials) => bail!("Invalid email or password"),
        Err(e) => return Err(e).context("Login failed"),
    }

    config.last_identifier = Some(email.clone());
    if let Err(e) = config.save() {
        warn!(error = %e, "Failed to remember last email");
    }

    println!("Logged in as {}", email);
    Ok(())
}

pub fn logout(api: &ApiClient) {
    api.logout();
    println!("Logged out");
}

pub fn status(api: &ApiClient, config: &Config) {
    if api.session().is_authenticated() {
        match config.last_identifier {
            Some(ref email) => println!("Logged in ({})", email),
            None => println!("Logged in"),
        }
    } else {
        println!("Not logged in");
    }
    println!("Backend: {}", api.base_url());
}

pub async fn register(api: &ApiClient, username: String, email: String, firstname: String) -> Result<()> {
    let password = prompt_password("Password")?;
    let confirm = prompt_password("Confirm password")?;
    if password != confirm {
        bail!("Passwords do not match");
    }

    let payload = RegisterPayload {
        username,
        firstname,
        email,
        password,
    };
    let account = api.register(&payload).await.context("Registration failed")?;

    println!("Created account {} <{}>", account.username, account.email);
    println!("Run `shopfront login` to sign in");
    Ok(())
}

fn session_hint(err: &ApiError) -> Option<&'static str> {
    err.is_unauthorized()
        .then_some("The session was rejected; run `shopfront login` again")
}

pub async fn products(api: &ApiClient, page: u32, size: u32) -> Result<()> {
    let result = api.get_products(PageRequest::new(page, size)).await;
    let listing = match result {
        Ok(listing) => listing,
        Err(e) => {
            if let Some(hint) = session_hint(&e) {
                eprintln!("{}", hint);
            }
            return Err(e).context("Failed to fetch products");
        }
    };

    if listing.is_empty() {
        println!("No products on page {}", page);
        return Ok(());
    }

    println!(
        "{:>6}  {:<name$}  {:<cat$}  {:>10}  {:<12}  {}",
        "ID",
        "NAME",
        "CATEGORY",
        "PRICE",
        "STATUS",
        "RATING",
        name = NAME_WIDTH,
        cat = CATEGORY_WIDTH,
    );
    for product in &listing.content {
        println!(
            "{:>6}  {:<name$}  {:<cat$}  {:>10}  {:<12}  {}",
            product.id,
            truncate_string(&product.name, NAME_WIDTH),
            truncate_string(&format_optional(&product.category, "-"), CATEGORY_WIDTH),
            format_price(product.price),
            product.status_display(),
            format_rating(product.rating),
            name = NAME_WIDTH,
            cat = CATEGORY_WIDTH,
        );
    }

    println!(
        "\nPage {} of {} ({} products)",
        listing.number.saturating_add(1),
        listing.total_pages.max(1),
        listing.total_elements
    );
    if listing.has_next() {
        println!("{}", next_page_hint(page, size));
    }
    Ok(())
}

fn next_page_hint(page: u32, size: u32) -> String {
    format!("Next: shopfront products --page {} --size {}", page.saturating_add(1), size)
}

fn print_product(product: &Product) {
    println!("{} ({})", product.name, product.code);
    println!("  Id:          {}", product.id);
    println!("  Category:    {}", format_optional(&product.category, "-"));
    println!("  Price:       {}", format_price(product.price));
    println!(
        "  Quantity:    {}",
        product.quantity.map(|q| q.to_string()).unwrap_or_else(|| "-".to_string())
    );
    println!("  Status:      {}", product.status_display());
    println!("  Rating:      {}", format_rating(product.rating));
    if let Some(ref reference) = product.internal_reference {
        println!("  Reference:   {}", reference);
    }
    if let Some(ref description) = product.description {
        println!("  {}", description);
    }
}

pub async fn product(api: &ApiClient, ids: &[i64]) -> Result<()> {
    let results = join_all(ids.iter().map(|&id| api.get_product(id))).await;

    let mut failures = 0;
    for (id, result) in ids.iter().zip(results) {
        match result {
            Ok(product) => {
                print_product(&product);
                println!();
            }
            Err(e) => {
                failures += 1;
                if let Some(hint) = session_hint(&e) {
                    eprintln!("{}", hint);
                }
                eprintln!("Product {}: {}", id, e);
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} products could not be fetched", failures, ids.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_hint_only_for_unauthorized() {
        assert!(session_hint(&ApiError::Unauthorized).is_some());
        assert!(session_hint(&ApiError::NotFound("x".into())).is_none());
    }

    #[test]
    fn test_next_page_hint() {
        assert_eq!(next_page_hint(0, 50), "Next: shopfront products --page 1 --size 50");
        assert_eq!(
            next_page_hint(u32::MAX, 10),
            format!("Next: shopfront products --page {} --size 10", u32::MAX)
        );
    }
}
