// src/common/phone.rs

/// Normaliza um número de WhatsApp/telefone para só dígitos com o DDI 55.
///
/// Exemplos:
/// - "+55 (11) 99999-9999" -> "5511999999999"
/// - "11 99999-9999" -> "5511999999999"
/// - "(31) 8888-8888" -> "553188888888"
///
/// String vazia (ou sem nenhum dígito) volta vazia: é o sinal de "inválido"
/// para quem chama. A heurística assume número brasileiro; um número
/// estrangeiro que não comece com 55 ganha o DDI do mesmo jeito.
pub fn normalize_whatsapp(raw_value: &str) -> String {
    let digits: String = raw_value.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return String::new();
    }

    if digits.starts_with("55") {
        return digits;
    }

    // Convenção de prefixo de tronco: descarta os zeros à esquerda
    let mut digits_no_zero = digits.trim_start_matches('0');
    if digits_no_zero.is_empty() {
        digits_no_zero = "0";
    }

    // 10 ou 11 dígitos = DDD + assinante, tamanhos válidos no Brasil
    if digits_no_zero.len() == 10 || digits_no_zero.len() == 11 {
        format!("55{}", digits_no_zero)
    } else if digits_no_zero.starts_with("55") {
        // Os zeros removidos podiam esconder um 55 (ex: "0055..."),
        // então não prefixamos de novo
        digits_no_zero.to_string()
    } else {
        format!("55{}", digits_no_zero)
    }
}

/// Link de conversa rápida. Não deve receber valor vazio.
pub fn whatsapp_link(normalized_digits: &str) -> String {
    format!("https://wa.me/{}", normalized_digits)
}
