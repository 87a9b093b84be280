mod normalization;

use zeroshot_prompt::*;
