#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;
use crate::models::{Category, Division};

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("Petrol", 10), "Petrol");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Monthly salary credit", 10), "Monthly s…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("Food", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("दवाई खर्च", 4), "दवा…");
}

// ── format_amount ──────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56)), "₹1,234.56");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "₹0.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.50)), "-₹42.50");
}

#[test]
fn test_format_amount_large() {
    assert_eq!(format_amount(dec!(1234567.89)), "₹1,234,567.89");
}

#[test]
fn test_format_amount_pads_decimals() {
    assert_eq!(format_amount(dec!(5000)), "₹5,000.00");
}

// ── cycle ─────────────────────────────────────────────────────

#[test]
fn test_cycle_forward_and_wrap() {
    let all = Division::all();
    assert_eq!(cycle(Division::Office, all, 1), Division::Personal);
    assert_eq!(cycle(Division::Personal, all, 1), Division::Office);
}

#[test]
fn test_cycle_backward_wraps() {
    assert_eq!(cycle(Category::Salary, Category::all(), -1), Category::Loan);
}

#[test]
fn test_cycle_empty_options() {
    assert_eq!(cycle(Category::Food, &[], 1), Category::Food);
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 10, 3);
    assert_eq!((index, scroll), (3, 1));
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (4, 2);
    scroll_down(&mut index, &mut scroll, 5, 3);
    assert_eq!((index, scroll), (4, 2));
}

#[test]
fn test_scroll_up_pulls_window() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
}

#[test]
fn test_scroll_to_bottom_and_top() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_bottom_empty_list() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 0, 4);
    assert_eq!((index, scroll), (0, 0));
}
