//! Order finalization types.

use tangerine_core::PaymentId;

/// Outcome of a successful finalization.
#[derive(Debug, Clone, Copy)]
pub struct FinalizeReceipt {
    /// Number of order rows written (one per cart line).
    pub order_lines: usize,
    /// ID of the payment record written for this event.
    pub payment_id: PaymentId,
}
