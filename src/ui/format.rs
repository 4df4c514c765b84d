// ============================================================================
// Formatage des nombres pour l'affichage
// ============================================================================
// - Devise USD avec séparateurs de milliers : $64,230.50
// - Notation compacte : 3.1T, 85B, 1.2K
// - Variation signée avec flèche : ▲ 1.23% / ▼ 0.45%
// ============================================================================

/// Insère des virgules tous les trois chiffres
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formate un montant en dollars avec `fraction_digits` décimales
pub fn format_currency(value: f64, fraction_digits: usize) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let formatted = format!("{:.*}", fraction_digits, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    // -0.00 s'affiche $0.00
    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match fraction {
        Some(fraction) => format!("{}${}.{}", sign, group_thousands(integer), fraction),
        None => format!("{}${}", sign, group_thousands(integer)),
    }
}

/// Prix avec deux décimales
pub fn format_price(value: f64) -> String {
    format_currency(value, 2)
}

/// Notation compacte (une décimale au plus)
///
/// CONCEPT : Changement d'unité après arrondi
/// - 999 950 arrondi à une décimale donnerait "1000K"
/// - on passe alors à l'unité suivante : "1M"
pub fn format_compact(value: f64) -> String {
    const SUFFIXES: [&str; 5] = ["", "K", "M", "B", "T"];

    if !value.is_finite() {
        return "-".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    let mut unit = 0;
    while unit < SUFFIXES.len() - 1 && abs >= 1000f64.powi(unit as i32 + 1) {
        unit += 1;
    }

    let mut rounded = (abs / 1000f64.powi(unit as i32) * 10.0).round() / 10.0;
    if rounded >= 1000.0 && unit < SUFFIXES.len() - 1 {
        unit += 1;
        rounded = (abs / 1000f64.powi(unit as i32) * 10.0).round() / 10.0;
    }

    let number = format!("{:.1}", rounded);
    let number = number.strip_suffix(".0").unwrap_or(&number);
    if number == "0" {
        return "0".to_string();
    }
    format!("{}{}{}", sign, number, SUFFIXES[unit])
}

/// Variation en pourcentage avec flèche (valeur absolue, deux décimales)
pub fn format_percent(value: f64) -> String {
    let arrow = if value >= 0.0 { "▲" } else { "▼" };
    format!("{} {:.2}%", arrow, value.abs())
}

/// Montant signé : +$1,234.00 / -$56.78
pub fn format_signed_currency(value: f64) -> String {
    if value >= 0.0 {
        format!("+{}", format_price(value))
    } else {
        format_price(value)
    }
}
