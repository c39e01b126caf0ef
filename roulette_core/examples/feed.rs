use roulette_core::{ProvablyFairRng, RouletteAnalyzer, Thresholds};

fn main() {
    // Example: twenty provably-fair spins fed into the analyzer
    let server_seed = "example-server-seed";
    let client_seed = "example-client-seed";
    let mut engine = RouletteAnalyzer::new(Thresholds::uniform(4));
    for nonce in 1..=20u64 {
        let outcome = ProvablyFairRng::new(server_seed, client_seed, nonce).outcome();
        engine.update(outcome).expect("outcome is on the wheel");
    }
    let rng = ProvablyFairRng::new(server_seed, client_seed, 0);
    println!("server_seed_hash={}", rng.server_seed_hash_hex());
    for rec in engine.evaluate(1.0).iter().take(10) {
        println!(
            "{:<8} {:<20} absent={:<3} stake={:.2} ({})",
            rec.bet.kind, rec.bet.value, rec.bet.absence_streak, rec.stake, rec.reason
        );
    }
}
