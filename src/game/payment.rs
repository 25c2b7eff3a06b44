use std::fmt;

/// 付款方在本局的身份
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// 庄家
    Dealer,
    /// 闲家
    NonDealer,
}

impl Role {
    pub fn of(seat: u8, dealer: u8) -> Self {
        if seat == dealer {
            Role::Dealer
        } else {
            Role::NonDealer
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Dealer => write!(f, "庄家"),
            Role::NonDealer => write!(f, "闲家"),
        }
    }
}

/// 付款原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentReason {
    /// 自摸：其他三家都付
    SelfDrawn,
    /// 点炮：只有放炮者付
    DealIn,
}

impl fmt::Display for PaymentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentReason::SelfDrawn => write!(f, "自摸"),
            PaymentReason::DealIn => write!(f, "点炮"),
        }
    }
}

/// 结算明细中的一笔付款
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentLine {
    /// 付款座位
    pub seat: u8,
    pub role: Role,
    /// 金额（正数）
    pub amount: i32,
    pub reason: PaymentReason,
}

impl fmt::Display for PaymentLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}号位 ({}) {}支付 {}", self.seat, self.role, self.reason, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_line_display() {
        let line = PaymentLine {
            seat: 2,
            role: Role::of(2, 2),
            amount: 12,
            reason: PaymentReason::DealIn,
        };
        assert_eq!(line.to_string(), "2号位 (庄家) 点炮支付 12");
        assert_eq!(Role::of(1, 2), Role::NonDealer);
    }
}
