// Copyright © spellclash 2024-present
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// The seeded, deterministic PRNG used by every nondeterministic operation in
/// the engine.
///
/// This is a first-class field of `GameState`, passed by reference wherever
/// it's needed (shuffling, dice rolls); there is no ambient or process-wide
/// RNG anywhere in this workspace.
pub type EngineRng = Xoshiro256StarStar;

/// Constructs the engine's PRNG from a 64-bit seed. Two engines constructed
/// with the same seed and fed the same command log produce bit-identical
/// sequences of random draws.
pub fn rng_from_seed(seed: u64) -> EngineRng {
    Xoshiro256StarStar::seed_from_u64(seed)
}
