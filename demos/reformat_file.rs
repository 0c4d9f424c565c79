//! Reformat a ThreadReport export from the command line
//!
//! Usage: cargo run --example reformat_file -- <input.xlsx> [output.xlsx]

use erc_reformat::parser::extract_comment_rows;
use erc_reformat::reader::read_first_sheet;
use erc_reformat::writer::{write_xlsx_file, SHEET_NAME};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let input = args.next().ok_or("usage: reformat_file <input> [output]")?;
    let output = args
        .next()
        .unwrap_or_else(|| "reformatted_comments.xlsx".to_string());

    let grid = read_first_sheet(&input)?;
    println!("Read {} rows from {}", grid.len(), input);

    let parsed = extract_comment_rows(&grid);
    for record in &parsed.rejected {
        println!("Skipped block at row {}: {}", record.row + 1, record.reason());
    }

    for comment in parsed.comments.iter().take(5) {
        println!(
            "#{:<4} {:<10} {:<20} {}",
            comment.number,
            comment.status,
            comment.created_by,
            comment.content.lines().next().unwrap_or("")
        );
    }

    write_xlsx_file(&output, SHEET_NAME, &parsed.comments)?;
    println!("Wrote {} comments to {}", parsed.comments.len(), output);
    Ok(())
}
