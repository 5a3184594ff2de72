//! Demo walking through the engine: group law on the toy curve, message
//! embedding, and a full ElGamal round trip on the demo curve, printing the
//! trace of every step.

use num_bigint::BigInt;

use ec_elgamal::{decrypt, encrypt, CurveParams, Embedding, KeyPair, Result, Trace};

fn main() -> Result<()> {
    println!("=== Elliptic-Curve ElGamal Demo ===\n");

    demo_group_law()?;
    demo_embedding()?;
    demo_elgamal()?;

    Ok(())
}

fn print_trace(trace: &Trace) {
    for line in trace.lines() {
        println!("    {line}");
    }
}

/// Group law on the toy curve, small enough to check by hand.
fn demo_group_law() -> Result<()> {
    println!("--- Group law on y² = x³ + x + 6 over F_11 ---");
    let curve = CurveParams::toy();
    println!("generator G = {}", curve.g);

    let mut trace = Trace::new();
    let doubled = curve.add(&curve.g, &curve.g, Some(&mut trace))?;
    println!("\nG + G = {doubled}");
    print_trace(&trace);

    let mut trace = Trace::new();
    let tripled = curve.multiply(&BigInt::from(3), &curve.g, Some(&mut trace))?;
    println!("\n3·G = {tripled}");
    print_trace(&trace);

    let neg = curve.negate(&curve.g);
    let identity = curve.add(&curve.g, &neg, None)?;
    println!("\nG + (-G) = {identity}\n");
    Ok(())
}

/// Both embedding strategies on the demo curve.
fn demo_embedding() -> Result<()> {
    println!("--- Message embedding over F_1021 ---");
    let curve = CurveParams::demo();
    let message = BigInt::from(42);

    let koblitz = Embedding::default();
    let mut trace = Trace::new();
    let embedded = koblitz.embed(&message, &curve, Some(&mut trace))?;
    println!("Koblitz: m = {message} -> {}", embedded.point);
    print_trace(&trace);
    let recovered = koblitz.recover(&embedded.point, None)?;
    println!("recovered m = {recovered}");

    let direct = Embedding::direct();
    let embedded = direct.embed(&message, &curve, None)?;
    let offset = embedded.offset.clone().unwrap_or_default();
    println!(
        "\nDirect search: m = {message} -> {} (offset {offset})",
        embedded.point
    );
    let exact = direct.recover(&embedded.point, Some(&offset))?;
    let approx = direct.recover(&embedded.point, None)?;
    println!("with offset: {exact}; without offset (approximation): {approx}\n");
    Ok(())
}

/// Full encrypt/decrypt round trip.
fn demo_elgamal() -> Result<()> {
    println!("--- ElGamal over F_1021 ---");
    let curve = CurveParams::demo();
    let embedding = Embedding::default();

    // Fixed scalars keep the demo reproducible; real callers sample both
    // with `random_scalar` / `KeyPair::generate`.
    let keys = KeyPair::derive(BigInt::from(15), &curve, None)?;
    println!("private key d = {}", keys.private);
    println!("public key  Q = {}", keys.public);

    let message = BigInt::from(33);
    let pm = embedding.embed(&message, &curve, None)?.point;
    println!("\nmessage {message} embedded as Pm = {pm}");

    let k = BigInt::from(27);
    let mut trace = Trace::new();
    let ct = encrypt(&pm, &keys.public, &k, &curve, Some(&mut trace))?;
    println!("\nencrypting with ephemeral k = {k}");
    print_trace(&trace);
    println!("ciphertext: C1 = {}, C2 = {}", ct.c1, ct.c2);

    let mut trace = Trace::new();
    let recovered = decrypt(&ct, &keys.private, &curve, Some(&mut trace))?;
    println!("\ndecrypting:");
    print_trace(&trace);
    println!("recovered point {recovered}");
    println!("recovered message: {}", embedding.recover(&recovered, None)?);
    Ok(())
}
