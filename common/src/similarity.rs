//! Similitud entre nombres de carpeta
//!
//! Razón de Ratcliff/Obershelp: `2 * M / T`, donde `M` es la suma de los
//! bloques coincidentes encontrados recursivamente a partir de la subcadena
//! común más larga y `T` el total de caracteres de ambas cadenas.

/// Candidato seleccionado por [`best_match`]
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    pub candidate: &'a str,
    pub score: f64,
}

/// Razón de similitud en `[0.0, 1.0]`
///
/// No es simétrica: los bloques se buscan primero en `a`, así que el orden de
/// los argumentos puede cambiar el resultado.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();

    if total == 0 {
        return 1.0;
    }

    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Mejor candidato con similitud >= `cutoff`
///
/// Cada candidato se puntúa como `ratio(candidato, target)`.
///
/// Con puntajes empatados gana el nombre lexicográficamente menor, así el
/// resultado no depende del orden del listado del sistema de archivos.
pub fn best_match<'a, I>(target: &str, candidates: I, cutoff: f64) -> Option<Match<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<Match<'a>> = None;

    for candidate in candidates {
        let score = ratio(candidate, target);
        if score < cutoff {
            continue;
        }

        let better = match &best {
            None => true,
            Some(current) => {
                score > current.score || (score == current.score && candidate < current.candidate)
            }
        };

        if better {
            best = Some(Match { candidate, score });
        }
    }

    best
}

/// Suma de los bloques coincidentes
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }

        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

/// Subcadena común más larga dentro de `a[alo..ahi]` y `b[blo..bhi]`
///
/// Devuelve `(i, j, k)` con `a[i..i+k] == b[j..j+k]`; ante empates se queda
/// con la que empieza antes en `a` y luego en `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0);
    // prev[j + 1] = longitud del sufijo común que termina en a[i - 1], b[j]
    let mut prev = vec![0usize; b.len() + 1];

    for i in alo..ahi {
        let mut cur = vec![0usize; b.len() + 1];
        for j in blo..bhi {
            if a[i] != b[j] {
                continue;
            }
            let k = prev[j] + 1;
            cur[j + 1] = k;
            if k > best.2 {
                best = (i + 1 - k, j + 1 - k, k);
            }
        }
        prev = cur;
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_identical() {
        assert!((ratio("Mimosa_pudica", "Mimosa_pudica") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_empty() {
        assert!((ratio("", "") - 1.0).abs() < 1e-9);
        assert_eq!(ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_ratio_known_values() {
        // "abcd" / "bcde": bloque "bcd" -> 2*3/8
        assert!((ratio("abcd", "bcde") - 0.75).abs() < 1e-9);
        // Ficus_benjamina (15) / Ficus_benjamin (14): 2*14/29
        assert!((ratio("Ficus_benjamina", "Ficus_benjamin") - 28.0 / 29.0).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_recurses_into_both_sides() {
        // "planta_012" y "plantas_012": "planta" + "_012" -> 2*10/21
        assert!((ratio("planta_012", "plantas_012") - 20.0 / 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_depends_on_argument_order() {
        // el bloque "Mimosa" se busca primero en el candidato
        assert!((ratio("Mimosca_deui_ca", "Mimosa_pudica") - 0.5).abs() < 1e-9);
        assert!((ratio("Mimosa_pudica", "Mimosca_deui_ca") - 22.0 / 28.0).abs() < 1e-9);
    }

    #[test]
    fn test_best_match_scores_candidate_first() {
        assert!(best_match("Mimosa_pudica", ["Mimosca_deui_ca"], 0.6).is_none());
    }

    #[test]
    fn test_best_match_respects_cutoff() {
        let candidates = ["Mimosa_pudica", "Ficus_benjamin"];
        assert!(best_match("Zzz_unmatched_plant", candidates, 0.6).is_none());
    }

    #[test]
    fn test_best_match_picks_highest() {
        let candidates = ["Ficus_elastica", "Ficus_benjamin", "Mimosa_pudica"];
        let found = best_match("Ficus_benjamina", candidates, 0.6).unwrap();
        assert_eq!(found.candidate, "Ficus_benjamin");
        assert!(found.score >= 0.6);
    }

    #[test]
    fn test_best_match_tie_is_lexicographic() {
        // ambos difieren de "abcx" en un solo carácter final
        let candidates = ["abcz", "abcy"];
        let found = best_match("abcx", candidates, 0.6).unwrap();
        assert_eq!(found.candidate, "abcy");
    }
}
