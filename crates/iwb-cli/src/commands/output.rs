//! Output writers for parsed invoices.

use iwb_core::ParsedInvoice;
use iwb_core::invoice::rules::format_cad_amount;
use rust_decimal::Decimal;

/// Output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension used when writing to a directory.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_invoice(invoice: &ParsedInvoice, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(invoice)?),
        OutputFormat::Csv => format_csv(invoice),
        OutputFormat::Text => Ok(format_text(invoice)),
    }
}

const CSV_HEADER: [&str; 12] = [
    "client",
    "email",
    "phone",
    "property_address",
    "invoice_date",
    "order_number",
    "total",
    "gst",
    "technology_fee",
    "paid_amount",
    "revenue_total",
    "line_items",
];

fn opt(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn format_csv(invoice: &ParsedInvoice) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;

    let line_items = invoice
        .line_items
        .iter()
        .map(|i| format!("{}={}", i.description, i.amount))
        .collect::<Vec<_>>()
        .join("; ");

    wtr.write_record([
        invoice.client.clone().unwrap_or_default(),
        invoice.email.clone().unwrap_or_default(),
        invoice.phone.clone().unwrap_or_default(),
        invoice.property_address.clone().unwrap_or_default(),
        invoice.invoice_date.clone().unwrap_or_default(),
        invoice.order_number.clone().unwrap_or_default(),
        opt(invoice.total),
        opt(invoice.gst),
        invoice.technology_fee.to_string(),
        opt(invoice.paid_amount),
        opt(invoice.revenue_total),
        line_items,
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(invoice: &ParsedInvoice) -> String {
    let mut output = String::new();
    let or_dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());

    output.push_str(&format!("Client:   {}\n", or_dash(&invoice.client)));
    output.push_str(&format!("Email:    {}\n", or_dash(&invoice.email)));
    output.push_str(&format!("Phone:    {}\n", or_dash(&invoice.phone)));
    output.push_str(&format!("Property: {}\n", or_dash(&invoice.property_address)));
    output.push_str(&format!("Date:     {}\n", or_dash(&invoice.invoice_date)));
    output.push_str(&format!("Order:    {}\n", or_dash(&invoice.order_number)));
    output.push('\n');

    if invoice.line_items.is_empty() {
        output.push_str("No line items\n");
    } else {
        output.push_str("Line items:\n");
        for item in &invoice.line_items {
            output.push_str(&format!(
                "  {:<40} CAD$ {:>12}\n",
                item.description,
                format_cad_amount(item.amount)
            ));
        }
    }
    output.push('\n');

    let amount = |label: &str, value: Option<Decimal>| match value {
        Some(v) => format!("  {:<15} CAD$ {:>12}\n", label, format_cad_amount(v)),
        None => format!("  {:<15} {:>17}\n", label, "-"),
    };

    output.push_str("Summary:\n");
    output.push_str(&amount("GST", invoice.gst));
    output.push_str(&amount("Technology fee", Some(invoice.technology_fee)));
    output.push_str(&amount("Total", invoice.total));
    output.push_str(&amount("Revenue", invoice.revenue_total));
    output.push_str(&amount("Paid", invoice.paid_amount));

    output
}
