//! Scoring normalizer output against expected answers.
//!
//! Every sample is worth one point when answered correctly. Declining to answer a
//! sample that has an answer costs nothing, but a confident wrong answer costs five
//! points, so a normalizer is rewarded for saying "invalid" when it is unsure.
//!
//! | Expected | Output                   | Points |
//! |----------|--------------------------|--------|
//! | valid    | same ids, valid          | +1     |
//! | valid    | invalid                  | 0      |
//! | valid    | different ids, valid     | -5     |
//! | invalid  | invalid                  | +1     |
//! | invalid  | valid                    | -5     |

pub mod grader;
