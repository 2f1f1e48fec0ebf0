//! # Receipt
//!
//! ```text
//! My Business
//! Receipt #9f1c2d3e
//! 2024-05-01 13:45:10
//! ----------------------------------------
//! Wireless Mouse (2)                $50.00
//! ----------------------------------------
//! Subtotal:                         $50.00
//! VAT:                               $5.00
//! Total:                            $55.00
//! Payment: CARD
//!
//! Thank you for your business!
//! ```

use poslite_core::{Sale, Settings};

const WIDTH: usize = 40;

pub fn receipt(sale: &Sale, settings: &Settings) -> String {
    let rule = "-".repeat(WIDTH);
    let row = |label: &str, value: String| {
        let pad = WIDTH.saturating_sub(label.chars().count()).max(1);
        format!("{label}{value:>pad$}")
    };

    let mut out = vec![
        settings.business_name.clone(),
        format!("Receipt #{}", sale.receipt_number()),
    ];
    if let Some(created_at) = sale.created_at {
        out.push(created_at.format("%Y-%m-%d %H:%M:%S").to_string());
    }

    out.push(rule.clone());
    for line in &sale.items {
        out.push(row(
            &format!("{} ({})", line.name, line.quantity),
            line.line_total()
                .map(|total| settings.format_money(total))
                .unwrap_or_else(|err| err.to_string()),
        ));
    }
    out.push(rule);

    out.push(row("Subtotal:", settings.format_money(sale.subtotal)));
    out.push(row("VAT:", settings.format_money(sale.vat)));
    out.push(row("Total:", settings.format_money(sale.total)));
    out.push(format!(
        "Payment: {}",
        sale.payment_method.as_str().to_uppercase()
    ));
    out.push(String::new());
    out.push("Thank you for your business!".to_string());

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_receipt_layout() {
        let sale: Sale = serde_json::from_value(json!({
            "id": "9f1c2d3e-1111-2222-3333-444455556666",
            "items": [{"product_id": "p1", "name": "Wireless Mouse", "price": 25, "quantity": 2}],
            "subtotal": 50, "vat": 5, "total": 55,
            "payment_method": "card",
            "created_at": "2024-05-01T13:45:10.500000"
        }))
        .unwrap();

        let text = receipt(&sale, &Settings::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "My Business");
        assert_eq!(lines[1], "Receipt #9f1c2d3e");
        assert_eq!(lines[2], "2024-05-01 13:45:10");
        assert!(lines[4].starts_with("Wireless Mouse (2)"));
        assert!(lines[4].ends_with("$50.00"));
        assert_eq!(lines[4].chars().count(), WIDTH);
        assert!(text.contains("Payment: CARD"));
        assert!(text.ends_with("Thank you for your business!"));
    }
}
