//! Galois Field GF(256) arithmetic for Shamir's Secret Sharing
//!
//! Uses the irreducible polynomial x^8 + x^4 + x^3 + x + 1 (0x11B), the
//! field used by AES. Multiplication is shift-and-reduce with no
//! data-dependent branches; division and inverses go through log/exp tables
//! built over the generator 0x03 and only ever see public x-coordinates.
//! The modulus is part of the share format: changing it breaks every share
//! ever issued.

/// The field modulus, x^8 + x^4 + x^3 + x + 1
pub const MODULUS: u16 = 0x11B;

/// Precomputed log table (log[x] = discrete log of x base 0x03, log[0] is undefined)
static LOG: [u8; 256] = [
    0, 0, 25, 1, 50, 2, 26, 198, 75, 199, 27, 104, 51, 238, 223, 3, 100, 4, 224, 14, 52, 141, 129,
    239, 76, 113, 8, 200, 248, 105, 28, 193, 125, 194, 29, 181, 249, 185, 39, 106, 77, 228, 166,
    114, 154, 201, 9, 120, 101, 47, 138, 5, 33, 15, 225, 36, 18, 240, 130, 69, 53, 147, 218, 142,
    150, 143, 219, 189, 54, 208, 206, 148, 19, 92, 210, 241, 64, 70, 131, 56, 102, 221, 253, 48,
    191, 6, 139, 98, 179, 37, 226, 152, 34, 136, 145, 16, 126, 110, 72, 195, 163, 182, 30, 66, 58,
    107, 40, 84, 250, 133, 61, 186, 43, 121, 10, 21, 155, 159, 94, 202, 78, 212, 172, 229, 243,
    115, 167, 87, 175, 88, 168, 80, 244, 234, 214, 116, 79, 174, 233, 213, 231, 230, 173, 232, 44,
    215, 117, 122, 235, 22, 11, 245, 89, 203, 95, 176, 156, 169, 81, 160, 127, 12, 246, 111, 23,
    196, 73, 236, 216, 67, 31, 45, 164, 118, 123, 183, 204, 187, 62, 90, 251, 96, 177, 134, 59, 82,
    161, 108, 170, 85, 41, 157, 151, 178, 135, 144, 97, 190, 220, 252, 188, 149, 207, 205, 55, 63,
    91, 209, 83, 57, 132, 60, 65, 162, 109, 71, 20, 42, 158, 93, 86, 242, 211, 171, 68, 17, 146,
    217, 35, 32, 46, 137, 180, 124, 184, 38, 119, 153, 227, 165, 103, 74, 237, 222, 197, 49, 254,
    24, 13, 99, 140, 128, 192, 247, 112, 7,
];

/// Precomputed exp table (exp[i] = 0x03^i), repeated so log sums never need reducing
static EXP: [u8; 510] = [
    1, 3, 5, 15, 17, 51, 85, 255, 26, 46, 114, 150, 161, 248, 19, 53, 95, 225, 56, 72, 216, 115,
    149, 164, 247, 2, 6, 10, 30, 34, 102, 170, 229, 52, 92, 228, 55, 89, 235, 38, 106, 190, 217,
    112, 144, 171, 230, 49, 83, 245, 4, 12, 20, 60, 68, 204, 79, 209, 104, 184, 211, 110, 178, 205,
    76, 212, 103, 169, 224, 59, 77, 215, 98, 166, 241, 8, 24, 40, 120, 136, 131, 158, 185, 208,
    107, 189, 220, 127, 129, 152, 179, 206, 73, 219, 118, 154, 181, 196, 87, 249, 16, 48, 80, 240,
    11, 29, 39, 105, 187, 214, 97, 163, 254, 25, 43, 125, 135, 146, 173, 236, 47, 113, 147, 174,
    233, 32, 96, 160, 251, 22, 58, 78, 210, 109, 183, 194, 93, 231, 50, 86, 250, 21, 63, 65, 195,
    94, 226, 61, 71, 201, 64, 192, 91, 237, 44, 116, 156, 191, 218, 117, 159, 186, 213, 100, 172,
    239, 42, 126, 130, 157, 188, 223, 122, 142, 137, 128, 155, 182, 193, 88, 232, 35, 101, 175,
    234, 37, 111, 177, 200, 67, 197, 84, 252, 31, 33, 99, 165, 244, 7, 9, 27, 45, 119, 153, 176,
    203, 70, 202, 69, 207, 74, 222, 121, 139, 134, 145, 168, 227, 62, 66, 198, 81, 243, 14, 18, 54,
    90, 238, 41, 123, 141, 140, 143, 138, 133, 148, 167, 242, 13, 23, 57, 75, 221, 124, 132, 151,
    162, 253, 28, 36, 108, 180, 199, 82, 246, 1, 3, 5, 15, 17, 51, 85, 255, 26, 46, 114, 150, 161,
    248, 19, 53, 95, 225, 56, 72, 216, 115, 149, 164, 247, 2, 6, 10, 30, 34, 102, 170, 229, 52, 92,
    228, 55, 89, 235, 38, 106, 190, 217, 112, 144, 171, 230, 49, 83, 245, 4, 12, 20, 60, 68, 204,
    79, 209, 104, 184, 211, 110, 178, 205, 76, 212, 103, 169, 224, 59, 77, 215, 98, 166, 241, 8,
    24, 40, 120, 136, 131, 158, 185, 208, 107, 189, 220, 127, 129, 152, 179, 206, 73, 219, 118,
    154, 181, 196, 87, 249, 16, 48, 80, 240, 11, 29, 39, 105, 187, 214, 97, 163, 254, 25, 43, 125,
    135, 146, 173, 236, 47, 113, 147, 174, 233, 32, 96, 160, 251, 22, 58, 78, 210, 109, 183, 194,
    93, 231, 50, 86, 250, 21, 63, 65, 195, 94, 226, 61, 71, 201, 64, 192, 91, 237, 44, 116, 156,
    191, 218, 117, 159, 186, 213, 100, 172, 239, 42, 126, 130, 157, 188, 223, 122, 142, 137, 128,
    155, 182, 193, 88, 232, 35, 101, 175, 234, 37, 111, 177, 200, 67, 197, 84, 252, 31, 33, 99,
    165, 244, 7, 9, 27, 45, 119, 153, 176, 203, 70, 202, 69, 207, 74, 222, 121, 139, 134, 145, 168,
    227, 62, 66, 198, 81, 243, 14, 18, 54, 90, 238, 41, 123, 141, 140, 143, 138, 133, 148, 167,
    242, 13, 23, 57, 75, 221, 124, 132, 151, 162, 253, 28, 36, 108, 180, 199, 82, 246,
];

/// Add two elements in GF(256) (XOR)
#[inline]
pub fn gf_add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Subtract two elements in GF(256) (same as add in characteristic 2)
#[inline]
pub fn gf_sub(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Multiply two elements in GF(256)
///
/// Shift-and-reduce with masks instead of branches or table lookups, so the
/// running time does not depend on the (secret) operands.
#[inline]
pub fn gf_mul(a: u8, b: u8) -> u8 {
    let mut a = a;
    let mut b = b;
    let mut product = 0u8;
    for _ in 0..8 {
        // 0xFF when the low bit of b is set, 0x00 otherwise
        let take = (b & 1).wrapping_neg();
        product ^= a & take;
        let carry = (a >> 7).wrapping_neg();
        a = (a << 1) ^ (carry & (MODULUS as u8));
        b >>= 1;
    }
    product
}

/// Divide two elements in GF(256)
///
/// Only ever called with public values (share indices), so the table lookup
/// is fine here.
#[inline]
pub fn gf_div(a: u8, b: u8) -> u8 {
    assert!(b != 0, "Division by zero in GF(256)");
    if a == 0 {
        return 0;
    }
    let log_a = LOG[a as usize] as usize;
    let log_b = LOG[b as usize] as usize;
    // Add 255 to handle negative result
    EXP[log_a + 255 - log_b]
}

/// Compute the inverse of an element in GF(256)
#[inline]
pub fn gf_inv(a: u8) -> u8 {
    assert!(a != 0, "Inverse of zero in GF(256)");
    EXP[255 - LOG[a as usize] as usize]
}

/// Evaluate a polynomial at a given x value
/// coefficients[0] is the constant term, coefficients[n-1] is the highest degree
pub fn poly_eval(coefficients: &[u8], x: u8) -> u8 {
    // Horner's method
    let mut result = 0u8;
    for &coef in coefficients.iter().rev() {
        result = gf_add(gf_mul(result, x), coef);
    }
    result
}

/// Lagrange basis polynomials evaluated at x = 0.
///
/// For share x-coordinates `xs`, returns `L_i(0) = Π_{j≠i} x_j / (x_j - x_i)`
/// for each i. These depend only on the indices, so a combine computes them
/// once and reuses them for every byte of the secret.
///
/// The x-coordinates must be distinct and non-zero.
pub fn lagrange_basis_at_zero(xs: &[u8]) -> Vec<u8> {
    xs.iter()
        .enumerate()
        .map(|(i, &xi)| {
            let mut numerator = 1u8;
            let mut denominator = 1u8;
            for (j, &xj) in xs.iter().enumerate() {
                if i != j {
                    // (0 - xj) = xj, negation is the identity in GF(2^n)
                    numerator = gf_mul(numerator, xj);
                    denominator = gf_mul(denominator, gf_sub(xj, xi));
                }
            }
            gf_div(numerator, denominator)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Constant term of the polynomial through `points`
    fn interpolate_at_zero(points: &[(u8, u8)]) -> u8 {
        let xs: Vec<u8> = points.iter().map(|&(x, _)| x).collect();
        lagrange_basis_at_zero(&xs)
            .into_iter()
            .zip(points)
            .fold(0, |acc, (li, &(_, y))| gf_add(acc, gf_mul(y, li)))
    }

    /// Textbook carry-less multiply with explicit reduction, for cross-checking
    fn slow_mul(a: u8, b: u8) -> u8 {
        let mut product: u16 = 0;
        for bit in 0..8 {
            if b & (1 << bit) != 0 {
                product ^= (a as u16) << bit;
            }
        }
        for bit in (8..16).rev() {
            if product & (1 << bit) != 0 {
                product ^= MODULUS << (bit - 8);
            }
        }
        product as u8
    }

    #[test]
    fn test_gf_add() {
        assert_eq!(gf_add(0x53, 0xCA), 0x99);
        assert_eq!(gf_add(0, 0x53), 0x53);
        assert_eq!(gf_add(0x53, 0x53), 0); // a + a = 0 in GF(2^n)
    }

    #[test]
    fn test_gf_mul() {
        assert_eq!(gf_mul(0, 0x53), 0);
        assert_eq!(gf_mul(1, 0x53), 0x53);
        assert_eq!(gf_mul(2, 2), 4);
        // 0x80 * 2 = 0x100, reduced by 0x11B
        assert_eq!(gf_mul(0x80, 2), 0x1B);
        // FIPS-197 worked example
        assert_eq!(gf_mul(0x57, 0x83), 0xC1);
        // 0x53 and 0xCA are inverses in the AES field
        assert_eq!(gf_mul(0x53, 0xCA), 1);
    }

    #[test]
    fn test_gf_mul_matches_reference_for_all_pairs() {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                assert_eq!(gf_mul(a, b), slow_mul(a, b), "a={:#04x} b={:#04x}", a, b);
            }
        }
    }

    #[test]
    fn test_tables_agree_with_mul() {
        for a in 1..=255u8 {
            for b in 1..=255u8 {
                let via_tables = EXP[LOG[a as usize] as usize + LOG[b as usize] as usize];
                assert_eq!(via_tables, gf_mul(a, b));
            }
        }
    }

    #[test]
    fn test_field_axioms() {
        let samples = [0u8, 1, 2, 3, 0x1B, 0x53, 0x80, 0xCA, 0xFE, 0xFF];
        for &a in &samples {
            assert_eq!(gf_add(a, 0), a);
            assert_eq!(gf_mul(a, 1), a);
            assert_eq!(gf_mul(a, 0), 0);
            for &b in &samples {
                assert_eq!(gf_mul(a, b), gf_mul(b, a));
                for &c in &samples {
                    assert_eq!(gf_mul(gf_mul(a, b), c), gf_mul(a, gf_mul(b, c)));
                    assert_eq!(gf_add(gf_add(a, b), c), gf_add(a, gf_add(b, c)));
                    assert_eq!(
                        gf_mul(a, gf_add(b, c)),
                        gf_add(gf_mul(a, b), gf_mul(a, c))
                    );
                }
            }
        }
    }

    #[test]
    fn test_gf_div() {
        assert_eq!(gf_div(0x53, 0x53), 1);
        assert_eq!(gf_div(0, 0x53), 0);
        for a in 0..=255u8 {
            for b in 1..=255u8 {
                assert_eq!(gf_mul(gf_div(a, b), b), a);
            }
        }
    }

    #[test]
    fn test_gf_inv() {
        // a * inv(a) = 1
        for a in 1..=255u8 {
            assert_eq!(gf_mul(a, gf_inv(a)), 1, "Failed for a={}", a);
        }
        assert_eq!(gf_inv(0x53), 0xCA);
    }

    #[test]
    #[should_panic(expected = "Division by zero")]
    fn test_gf_div_by_zero_panics() {
        gf_div(7, 0);
    }

    #[test]
    fn test_poly_eval() {
        // p(x) = 5 + 3x + 2x^2
        let coeffs = [5u8, 3, 2];
        // p(0) = 5
        assert_eq!(poly_eval(&coeffs, 0), 5);
        // p(1) = 5 ^ 3 ^ 2 = 4 (XOR in GF(256))
        assert_eq!(poly_eval(&coeffs, 1), 4);
        // p(2) = 5 ^ 6 ^ 8
        assert_eq!(poly_eval(&coeffs, 2), 5 ^ 6 ^ 8);
        assert_eq!(poly_eval(&[], 9), 0);
    }

    #[test]
    fn test_lagrange_simple() {
        // p(x) = 42 + 7x
        let secret = 42u8;
        let coef = 7u8;

        let shares: Vec<(u8, u8)> = (1..=3)
            .map(|x| (x, gf_add(secret, gf_mul(coef, x))))
            .collect();

        // Any 2 points recover the constant term
        assert_eq!(interpolate_at_zero(&shares[0..2]), secret);
        assert_eq!(interpolate_at_zero(&shares[1..3]), secret);
        assert_eq!(interpolate_at_zero(&[shares[0], shares[2]]), secret);
    }

    #[test]
    fn test_lagrange_degree_four() {
        let coeffs = [0xA7u8, 0x11, 0xFE, 0x02, 0x9C];
        let xs = [200u8, 3, 77, 1, 255];
        let points: Vec<(u8, u8)> = xs.iter().map(|&x| (x, poly_eval(&coeffs, x))).collect();
        assert_eq!(interpolate_at_zero(&points), 0xA7);

        // Basis values sum to 1: interpolating the constant polynomial 1
        let sum = lagrange_basis_at_zero(&xs).into_iter().fold(0, gf_add);
        assert_eq!(sum, 1);
    }
}
